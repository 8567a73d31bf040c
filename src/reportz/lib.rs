//! # Reportz Architecture
//!
//! Reportz is a **UI-agnostic editing core** for report templates. The CLI
//! in `main.rs` is one client of the library; the same core could sit
//! behind a web editor or a sync daemon without changes.
//!
//! ## Layers
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  CLI (args.rs + output helpers, wired by main.rs)            │
//! │  - argument parsing, colored output, exit codes              │
//! │  - the only layer that touches stdout/stderr                 │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  API facade (api.rs)                                         │
//! │  - owns the store and the editing session                    │
//! │  - one method per operation, persists a draft after edits    │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                    │
//! │  - session logic only, structured CmdResult out              │
//! │  - no terminal or filesystem assumptions                     │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Models + storage (model.rs, settings.rs, store/)            │
//! │  - TemplateDoc and SettingsModel hold in-memory state        │
//! │  - SnapshotStore trait: FileStore / InMemoryStore            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Draft and publish
//!
//! Editing is deliberately permissive: a report may reference paragraphs
//! that do not exist yet, duplicate references are fine, and nothing
//! cross-checks while you type. Each edit lands in a persisted *draft*, so
//! the next invocation resumes where the previous one stopped. `save` runs
//! the strict checks (id syntax, required fields, every reference
//! resolves) and publishes only when all of them pass. A failed save
//! leaves both the published files and the draft exactly as they were.
//!
//! ## Module Overview
//!
//! - [`api`]: entry point for all operations
//! - [`commands`]: one module per operation
//! - [`model`]: the template document (paragraphs + reports)
//! - [`settings`]: display settings over the parameter catalog
//! - [`catalog`]: catalog types and the built-in parameter set
//! - [`snapshot`]: wire records and save-boundary validation
//! - [`session`]: the editing session handed to every command
//! - [`store`]: storage trait and its file/memory implementations
//! - [`config`]: CLI configuration
//! - [`editor`]: external editor integration
//! - [`ident`]: id rules and normalization helpers
//! - [`error`]: error types

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod ident;
pub mod model;
pub mod session;
pub mod settings;
pub mod snapshot;
pub mod store;
