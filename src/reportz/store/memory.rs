use super::SnapshotStore;
use crate::catalog::{CatalogEntry, DEFAULT_CATALOG};
use crate::error::Result;
use crate::snapshot::{SessionSnapshot, SettingsSnapshot, TemplateSnapshot};

/// In-memory store for tests. Keeps the same shapes the file store
/// persists, without touching the filesystem.
#[derive(Debug)]
pub struct InMemoryStore {
    templates: TemplateSnapshot,
    settings: Option<SettingsSnapshot>,
    catalog: Vec<CatalogEntry>,
    draft: Option<SessionSnapshot>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            templates: TemplateSnapshot::default(),
            settings: None,
            catalog: DEFAULT_CATALOG.clone(),
            draft: None,
        }
    }

    pub fn with_catalog(mut self, catalog: Vec<CatalogEntry>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_templates(mut self, templates: TemplateSnapshot) -> Self {
        self.templates = templates;
        self
    }

    pub fn has_draft(&self) -> bool {
        self.draft.is_some()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for InMemoryStore {
    fn load_templates(&self) -> Result<TemplateSnapshot> {
        Ok(self.templates.clone())
    }

    fn save_templates(&mut self, snapshot: &TemplateSnapshot) -> Result<()> {
        self.templates = snapshot.clone();
        Ok(())
    }

    fn load_settings(&self) -> Result<Option<SettingsSnapshot>> {
        Ok(self.settings.clone())
    }

    fn save_settings(&mut self, snapshot: &SettingsSnapshot) -> Result<()> {
        self.settings = Some(snapshot.clone());
        Ok(())
    }

    fn load_catalog(&self) -> Result<Vec<CatalogEntry>> {
        Ok(self.catalog.clone())
    }

    fn load_draft(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self.draft.clone())
    }

    fn save_draft(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        self.draft = Some(snapshot.clone());
        Ok(())
    }

    fn clear_draft(&mut self) -> Result<()> {
        self.draft = None;
        Ok(())
    }
}
