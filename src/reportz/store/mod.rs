//! # Storage Layer
//!
//! Persistence abstraction for reportz. The [`SnapshotStore`] trait is the
//! only place the core touches durable state; everything above it works on
//! in-memory snapshots.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production file-based storage, one directory of
//!   JSON files
//! - [`memory::InMemoryStore`]: in-memory storage for tests
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! .reportz/
//! ├── paragraphs.json      # Published paragraphs, sorted by id
//! ├── reports.json         # Published reports, sorted by id
//! ├── parameters.json      # Parameter catalog (external input)
//! ├── parameters_ui.json   # Display settings (visibility + order)
//! ├── draft.json           # Working draft, present only mid-edit
//! └── config.json          # CLI configuration
//! ```
//!
//! Published template state is split into two files so the paragraph pool
//! and the report arrangements can be diffed and edited independently.
//! The draft holds the whole session in one file and is removed on save.

use crate::catalog::CatalogEntry;
use crate::error::Result;
use crate::snapshot::{SessionSnapshot, SettingsSnapshot, TemplateSnapshot};

pub mod fs;
pub mod memory;

/// Abstract interface for template, settings and draft persistence.
pub trait SnapshotStore {
    /// Load published template state. Missing state reads as empty.
    fn load_templates(&self) -> Result<TemplateSnapshot>;

    /// Publish template state. Callers validate first.
    fn save_templates(&mut self, snapshot: &TemplateSnapshot) -> Result<()>;

    /// Load saved display settings. `None` when never saved.
    fn load_settings(&self) -> Result<Option<SettingsSnapshot>>;

    /// Publish display settings.
    fn save_settings(&mut self, snapshot: &SettingsSnapshot) -> Result<()>;

    /// Load the parameter catalog, bootstrapping a default one if the
    /// store has none yet.
    fn load_catalog(&self) -> Result<Vec<CatalogEntry>>;

    /// Load the working draft left by an earlier session, if any.
    fn load_draft(&self) -> Result<Option<SessionSnapshot>>;

    /// Persist the working draft.
    fn save_draft(&mut self, snapshot: &SessionSnapshot) -> Result<()>;

    /// Remove the working draft. A missing draft is not an error.
    fn clear_draft(&mut self) -> Result<()>;
}
