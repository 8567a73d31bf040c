//! External editor integration for paragraph text.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{ReportzError, Result};

/// Resolves the editor command: $EDITOR, then $VISUAL, then the first of
/// vim/vi/nano found on the PATH.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        match env::var(var) {
            Ok(editor) if !editor.trim().is_empty() => return Ok(editor),
            _ => {}
        }
    }

    for fallback in ["vim", "vi", "nano"] {
        let found = Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if found {
            return Ok(fallback.to_string());
        }
    }

    Err(ReportzError::Editor(
        "no editor found, set $EDITOR".to_string(),
    ))
}

/// Runs the editor on `file_path`, waits for it to exit, and reads the
/// file back.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|e| ReportzError::Editor(format!("failed to launch '{editor}': {e}")))?;
    if !status.success() {
        return Err(ReportzError::Editor(format!(
            "'{editor}' exited with non-zero status"
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Edits `initial` in a temp file and returns the result. The buffer holds
/// paragraph text alone; ids and labels travel on the command line.
pub fn edit_text(initial: &str, file_extension: &str) -> Result<String> {
    let temp_file = env::temp_dir().join(format!("reportz_edit{file_extension}"));

    fs::write(&temp_file, initial)?;
    let edited = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    edited
}
