//! Identifier rules and string normalization shared by both models.
//!
//! Ids are ASCII letters, digits and underscore only. Every free-text field
//! is trimmed on the way in; reference lists drop empty entries but keep
//! duplicates and order.

use crate::error::{ReportzError, Result};

/// True when `id` is non-empty and contains only ASCII letters, digits
/// and `_`.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validates a trimmed id, naming the entity kind in the error.
pub fn check_id(kind: &str, id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(ReportzError::Validation(format!("{kind} id is empty")));
    }
    if !is_valid_id(id) {
        return Err(ReportzError::Validation(format!(
            "invalid {kind} id: {id:?} (letters, digits and underscore only)"
        )));
    }
    Ok(())
}

/// Trims a field value.
pub fn norm_str(s: &str) -> String {
    s.trim().to_string()
}

/// Trimmed value, or `id` when the value is blank.
pub fn or_id(value: &str, id: &str) -> String {
    let v = value.trim();
    if v.is_empty() {
        id.to_string()
    } else {
        v.to_string()
    }
}

/// Normalizes a paragraph-id list: trims entries and drops empty ones.
/// Duplicates and order are preserved.
pub fn norm_id_list<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
