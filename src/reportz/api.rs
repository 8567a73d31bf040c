//! # Reportz API
//!
//! [`ReportzApi`] is the high-level entry point for any client: the CLI in
//! this crate, or an embedding application. It owns the store and the
//! editing session and exposes one method per operation.
//!
//! Every mutating method persists the session as a draft after the edit,
//! so an interrupted or multi-invocation editing flow resumes where it
//! left off. [`ReportzApi::save`] validates and publishes, then drops the
//! draft; [`ReportzApi::discard`] drops the draft and reloads published
//! state.
//!
//! ```no_run
//! use reportz::api::ReportzApi;
//! use reportz::snapshot::ParagraphRecord;
//! use reportz::store::fs::FileStore;
//!
//! # fn main() -> reportz::error::Result<()> {
//! let store = FileStore::new(".reportz".into());
//! let mut api = ReportzApi::open(store)?;
//! api.add_paragraph(&ParagraphRecord {
//!     id: "lv".into(),
//!     label: "Left ventricle".into(),
//!     description: String::new(),
//!     text: "Left ventricle normal in size and function.".into(),
//! })?;
//! api.save()?;
//! # Ok(())
//! # }
//! ```

use crate::commands;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::EditorSession;
use crate::snapshot::{ParagraphRecord, ReportRecord};
use crate::store::SnapshotStore;

pub struct ReportzApi<S: SnapshotStore> {
    store: S,
    session: EditorSession,
}

impl<S: SnapshotStore> ReportzApi<S> {
    /// Opens a session against the store, resuming a draft if one exists.
    pub fn open(store: S) -> Result<Self> {
        let session = commands::open::run(&store)?;
        Ok(Self { store, session })
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Persists the current session as the working draft. Skipped while
    /// the session is clean so a read-only invocation leaves no files.
    fn sync_draft(&mut self) -> Result<()> {
        if self.session.dirty {
            self.store.save_draft(&self.session.to_draft())?;
        }
        Ok(())
    }

    // --- lifecycle ---

    pub fn init(&mut self) -> Result<CmdResult> {
        commands::init::run(&mut self.store, &mut self.session)
    }

    pub fn save(&mut self) -> Result<CmdResult> {
        commands::save::run(&mut self.store, &mut self.session)
    }

    pub fn discard(&mut self) -> Result<CmdResult> {
        self.store.clear_draft()?;
        self.session = commands::open::run(&self.store)?;
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::success("Draft discarded, published state reloaded"));
        Ok(result)
    }

    pub fn check(&self) -> Result<CmdResult> {
        commands::check::run(&self.session)
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.session)
    }

    // --- paragraphs ---

    pub fn add_paragraph(&mut self, rec: &ParagraphRecord) -> Result<CmdResult> {
        let result = commands::paragraph::add(&mut self.session, rec)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn update_paragraph(&mut self, previous_id: &str, rec: &ParagraphRecord) -> Result<CmdResult> {
        let result = commands::paragraph::update(&mut self.session, previous_id, rec)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn delete_paragraph(&mut self, id: &str) -> Result<CmdResult> {
        let result = commands::paragraph::delete(&mut self.session, id)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn list_paragraphs(&self, search: Option<&str>) -> Result<CmdResult> {
        commands::paragraph::list(&self.session, search)
    }

    pub fn show_paragraph(&self, id: &str) -> Result<CmdResult> {
        commands::paragraph::show(&self.session, id)
    }

    // --- reports ---

    pub fn add_report(&mut self, rec: &ReportRecord) -> Result<CmdResult> {
        let result = commands::report::add(&mut self.session, rec)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn update_report(&mut self, previous_id: &str, rec: &ReportRecord) -> Result<CmdResult> {
        let result = commands::report::update(&mut self.session, previous_id, rec)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn delete_report(&mut self, id: &str) -> Result<CmdResult> {
        let result = commands::report::delete(&mut self.session, id)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn list_reports(&self, search: Option<&str>) -> Result<CmdResult> {
        commands::report::list(&self.session, search)
    }

    pub fn show_report(&self, id: &str) -> Result<CmdResult> {
        commands::report::show(&self.session, id)
    }

    pub fn render_report(&self, id: &str) -> Result<CmdResult> {
        commands::render::run(&self.session, id)
    }

    // --- references ---

    pub fn attach_ref(&mut self, report_id: &str, paragraph_id: &str) -> Result<CmdResult> {
        let result = commands::refs::attach(&mut self.session, report_id, paragraph_id)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn detach_ref(&mut self, report_id: &str, paragraph_id: &str) -> Result<CmdResult> {
        let result = commands::refs::detach(&mut self.session, report_id, paragraph_id)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn move_ref_to_end(&mut self, report_id: &str, paragraph_id: &str) -> Result<CmdResult> {
        let result = commands::refs::tail(&mut self.session, report_id, paragraph_id)?;
        self.sync_draft()?;
        Ok(result)
    }

    // --- display settings ---

    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<CmdResult> {
        let result = commands::settings::set_enabled(&mut self.session, name, enabled)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn set_order(&mut self, name: &str, order: f64) -> Result<CmdResult> {
        let result = commands::settings::set_order(&mut self.session, name, order)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn enable_all(&mut self) -> Result<CmdResult> {
        let result = commands::settings::enable_all(&mut self.session)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn disable_all(&mut self) -> Result<CmdResult> {
        let result = commands::settings::disable_all(&mut self.session)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn renumber(&mut self, step: i64) -> Result<CmdResult> {
        let result = commands::settings::renumber(&mut self.session, step)?;
        self.sync_draft()?;
        Ok(result)
    }

    pub fn list_settings(&self) -> Result<CmdResult> {
        commands::settings::list(&self.session)
    }

    pub fn export_settings(&self) -> Result<CmdResult> {
        commands::export::run(&self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn paragraph(id: &str) -> ParagraphRecord {
        ParagraphRecord {
            id: id.into(),
            label: id.to_uppercase(),
            description: String::new(),
            text: format!("{id} text."),
        }
    }

    #[test]
    fn edits_survive_reopening_via_the_draft() {
        let mut api = ReportzApi::open(InMemoryStore::new()).unwrap();
        api.add_paragraph(&paragraph("p1")).unwrap();

        let api = ReportzApi::open(api.into_store()).unwrap();
        assert!(api.session().dirty);
        assert!(api.session().doc.paragraph("p1").is_some());
    }

    #[test]
    fn read_only_calls_leave_no_draft() {
        let api = ReportzApi::open(InMemoryStore::new()).unwrap();
        api.list_paragraphs(None).unwrap();
        api.status().unwrap();
        let store = api.into_store();
        assert!(!store.has_draft());
    }

    #[test]
    fn discard_restores_published_state() {
        let mut api = ReportzApi::open(InMemoryStore::new()).unwrap();
        api.init().unwrap();
        api.add_paragraph(&paragraph("extra")).unwrap();
        assert!(api.session().dirty);

        api.discard().unwrap();
        assert!(!api.session().dirty);
        assert!(api.session().doc.paragraph("extra").is_none());
        assert!(api.session().doc.paragraph("norms").is_some());
    }

    #[test]
    fn save_then_reopen_is_clean() {
        let mut api = ReportzApi::open(InMemoryStore::new()).unwrap();
        api.init().unwrap();
        api.add_paragraph(&paragraph("p1")).unwrap();
        api.attach_ref("default_echo", "p1").unwrap();
        api.save().unwrap();

        let api = ReportzApi::open(api.into_store()).unwrap();
        assert!(!api.session().dirty);
        let report = api.session().doc.report("default_echo").unwrap();
        assert_eq!(report.paragraph_ids, vec!["norms", "p1"]);
    }

    #[test]
    fn failed_save_keeps_the_draft() {
        let mut api = ReportzApi::open(InMemoryStore::new()).unwrap();
        api.init().unwrap();
        api.attach_ref("default_echo", "ghost").unwrap();
        assert!(api.save().is_err());

        // a new session still sees the broken draft for fixing up
        let api = ReportzApi::open(api.into_store()).unwrap();
        assert!(api.session().dirty);
        let report = api.session().doc.report("default_echo").unwrap();
        assert!(report.paragraph_ids.contains(&"ghost".to_string()));
    }

    #[test]
    fn settings_flow_end_to_end() {
        let mut api = ReportzApi::open(InMemoryStore::new()).unwrap();
        api.init().unwrap();
        api.set_enabled("MVA", false).unwrap();
        api.set_order("MVAP", 1.0).unwrap();
        api.save().unwrap();

        let api = ReportzApi::open(api.into_store()).unwrap();
        let mva = api.session().settings.get("MVA").unwrap();
        assert!(!mva.enabled);
        assert_eq!(api.session().settings.get("MVAP").unwrap().order, 1);
    }
}
