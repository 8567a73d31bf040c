use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::SnapshotStore;
use crate::catalog::{CatalogEntry, CatalogSnapshot, DEFAULT_CATALOG};
use crate::error::Result;
use crate::snapshot::{
    ParagraphRecord, ReportRecord, SessionSnapshot, SettingsSnapshot, TemplateSnapshot,
};

const PARAGRAPHS_FILE: &str = "paragraphs.json";
const REPORTS_FILE: &str = "reports.json";
const CATALOG_FILE: &str = "parameters.json";
const SETTINGS_FILE: &str = "parameters_ui.json";
const DRAFT_FILE: &str = "draft.json";

/// File-based store: one directory of JSON files.
pub struct FileStore {
    root: PathBuf,
}

/// On-disk shape of `paragraphs.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ParagraphsFile {
    #[serde(default)]
    paragraphs: Vec<ParagraphRecord>,
}

/// On-disk shape of `reports.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ReportsFile {
    #[serde(default)]
    reports: Vec<ReportRecord>,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.file_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        self.ensure_root()?;
        let mut content = serde_json::to_string_pretty(value)?;
        content.push('\n');
        fs::write(self.file_path(name), content)?;
        Ok(())
    }
}

impl SnapshotStore for FileStore {
    fn load_templates(&self) -> Result<TemplateSnapshot> {
        let paragraphs: ParagraphsFile = self.read_json(PARAGRAPHS_FILE)?.unwrap_or_default();
        let reports: ReportsFile = self.read_json(REPORTS_FILE)?.unwrap_or_default();
        Ok(TemplateSnapshot {
            paragraphs: paragraphs.paragraphs,
            reports: reports.reports,
        })
    }

    fn save_templates(&mut self, snapshot: &TemplateSnapshot) -> Result<()> {
        self.write_json(
            PARAGRAPHS_FILE,
            &ParagraphsFile {
                paragraphs: snapshot.paragraphs.clone(),
            },
        )?;
        self.write_json(
            REPORTS_FILE,
            &ReportsFile {
                reports: snapshot.reports.clone(),
            },
        )
    }

    fn load_settings(&self) -> Result<Option<SettingsSnapshot>> {
        self.read_json(SETTINGS_FILE)
    }

    fn save_settings(&mut self, snapshot: &SettingsSnapshot) -> Result<()> {
        self.write_json(SETTINGS_FILE, snapshot)
    }

    fn load_catalog(&self) -> Result<Vec<CatalogEntry>> {
        if let Some(snap) = self.read_json::<CatalogSnapshot>(CATALOG_FILE)? {
            return Ok(snap.parameters);
        }
        // First run: materialize the built-in catalog so users can edit it.
        let snap = CatalogSnapshot {
            parameters: DEFAULT_CATALOG.clone(),
        };
        self.write_json(CATALOG_FILE, &snap)?;
        Ok(snap.parameters)
    }

    fn load_draft(&self) -> Result<Option<SessionSnapshot>> {
        self.read_json(DRAFT_FILE)
    }

    fn save_draft(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        self.write_json(DRAFT_FILE, snapshot)
    }

    fn clear_draft(&mut self) -> Result<()> {
        let path = self.file_path(DRAFT_FILE);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
