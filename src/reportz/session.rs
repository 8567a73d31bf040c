//! The editing session: one template document plus the settings list.
//!
//! Commands receive the session explicitly; nothing in the crate is
//! process-global. `dirty` tracks whether the session has edits that have
//! not been published yet.

use crate::model::TemplateDoc;
use crate::settings::SettingsModel;
use crate::snapshot::SessionSnapshot;

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    pub doc: TemplateDoc,
    pub settings: SettingsModel,
    pub dirty: bool,
}

impl EditorSession {
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Snapshot of the whole session for draft persistence.
    pub fn to_draft(&self) -> SessionSnapshot {
        SessionSnapshot {
            templates: self.doc.to_snapshot(),
            settings: self.settings.serialize(),
        }
    }
}
