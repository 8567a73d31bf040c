use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ReportzError, Result};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".txt";
const DEFAULT_RENUMBER_STEP: i64 = 10;

/// CLI configuration, stored as config.json next to the store files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportzConfig {
    /// Extension for editor temp files (".txt", ".md", ...).
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Default step for `ui renumber`.
    #[serde(default = "default_renumber_step")]
    pub renumber_step: i64,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_renumber_step() -> i64 {
    DEFAULT_RENUMBER_STEP
}

impl Default for ReportzConfig {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            renumber_step: default_renumber_step(),
        }
    }
}

impl ReportzConfig {
    /// Reads the config from `dir`, falling back to defaults when the file
    /// does not exist.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILENAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }

    /// Writes the config into `dir`, creating the directory if needed.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Value of one key as text, for `config <key>`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "file_ext" => Some(self.file_ext.clone()),
            "renumber_step" => Some(self.renumber_step.to_string()),
            _ => None,
        }
    }

    /// Sets one key from text, for `config <key> <value>`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "file_ext" => {
                self.set_file_ext(value);
                Ok(())
            }
            "renumber_step" => {
                let step: i64 = value.parse().map_err(|_| {
                    ReportzError::Validation(format!("renumber_step must be an integer: {value:?}"))
                })?;
                if step < 1 {
                    return Err(ReportzError::Validation(
                        "renumber_step must be at least 1".into(),
                    ));
                }
                self.renumber_step = step;
                Ok(())
            }
            _ => Err(ReportzError::Validation(format!(
                "unknown config key: {key}"
            ))),
        }
    }

    /// Sets the editor file extension, prepending the dot when missing.
    pub fn set_file_ext(&mut self, ext: &str) {
        let ext = ext.trim();
        self.file_ext = match ext.strip_prefix('.') {
            Some(_) => ext.to_string(),
            None => format!(".{ext}"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = ReportzConfig::default();
        assert_eq!(config.file_ext, ".txt");
        assert_eq!(config.renumber_step, 10);
    }

    #[test]
    fn set_file_ext_normalizes_the_dot() {
        let mut config = ReportzConfig::default();
        config.set_file_ext("md");
        assert_eq!(config.file_ext, ".md");
        config.set_file_ext(".rst");
        assert_eq!(config.file_ext, ".rst");
    }

    #[test]
    fn load_missing_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ReportzConfig::load(dir.path().join("nope")).unwrap();
        assert_eq!(config, ReportzConfig::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut config = ReportzConfig::default();
        config.set("renumber_step", "5").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = ReportzConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.renumber_step, 5);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut config = ReportzConfig::default();
        assert!(config.set("renumber_step", "zero").is_err());
        assert!(config.set("renumber_step", "0").is_err());
        assert!(config.set("nonsense", "1").is_err());
    }

    #[test]
    fn get_by_key() {
        let config = ReportzConfig::default();
        assert_eq!(config.get("file_ext").as_deref(), Some(".txt"));
        assert_eq!(config.get("renumber_step").as_deref(), Some("10"));
        assert!(config.get("nonsense").is_none());
    }
}
