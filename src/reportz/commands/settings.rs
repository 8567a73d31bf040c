//! Display-settings edits: visibility, order, bulk toggles, renumbering.

use super::{CmdMessage, CmdResult};
use crate::error::{ReportzError, Result};
use crate::session::EditorSession;

/// Shows or hides one parameter.
pub fn set_enabled(session: &mut EditorSession, name: &str, enabled: bool) -> Result<CmdResult> {
    ensure_parameter(session, name)?;
    session.settings.set_enabled(name, enabled);
    session.mark_dirty();

    let mut result = CmdResult::default();
    let verb = if enabled { "Enabled" } else { "Disabled" };
    result.add_message(CmdMessage::success(format!("{verb}: {}", name.trim())));
    Ok(result)
}

/// Sets one parameter's sort order. Fractional values truncate; anything
/// non-finite falls back to the default order.
pub fn set_order(session: &mut EditorSession, name: &str, order: f64) -> Result<CmdResult> {
    ensure_parameter(session, name)?;
    session.settings.set_order(name, order);
    session.mark_dirty();

    let mut result = CmdResult::default();
    if let Some(s) = session.settings.get(name) {
        result.add_message(CmdMessage::success(format!(
            "Order for {} set to {}",
            s.name, s.order
        )));
    }
    Ok(result)
}

/// Enables every parameter.
pub fn enable_all(session: &mut EditorSession) -> Result<CmdResult> {
    session.settings.enable_all();
    session.mark_dirty();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "All {} parameter(s) enabled",
        session.settings.len()
    )));
    Ok(result)
}

/// Disables every parameter.
pub fn disable_all(session: &mut EditorSession) -> Result<CmdResult> {
    session.settings.disable_all();
    session.mark_dirty();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "All {} parameter(s) disabled",
        session.settings.len()
    )));
    Ok(result)
}

/// Renumbers orders as consecutive multiples of `step`, enabled and
/// disabled groups each on their own, keeping relative order.
pub fn renumber(session: &mut EditorSession, step: i64) -> Result<CmdResult> {
    session.settings.renumber(step);
    session.mark_dirty();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Orders renumbered in steps of {}",
        step.max(1)
    )));
    Ok(result)
}

/// All parameters with their current settings, for the two-group listing.
pub fn list(session: &EditorSession) -> Result<CmdResult> {
    Ok(CmdResult::default().with_settings(session.settings.items().to_vec()))
}

fn ensure_parameter(session: &EditorSession, name: &str) -> Result<()> {
    if session.settings.get(name).is_none() {
        return Err(ReportzError::Validation(format!(
            "no such parameter: {}",
            name.trim()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::settings::SettingsModel;
    use crate::snapshot::SettingsSnapshot;

    fn session() -> EditorSession {
        let catalog: Vec<CatalogEntry> = ["a", "b", "c"]
            .iter()
            .map(|n| CatalogEntry {
                name: n.to_string(),
                description: String::new(),
            })
            .collect();
        EditorSession {
            settings: SettingsModel::load(&catalog, &SettingsSnapshot::default()),
            ..Default::default()
        }
    }

    #[test]
    fn toggling_unknown_parameter_fails() {
        let mut session = session();
        let err = set_enabled(&mut session, "ghost", true).unwrap_err();
        assert!(err.to_string().contains("no such parameter"));
        assert!(!session.dirty);
    }

    #[test]
    fn set_order_reports_the_coerced_value() {
        let mut session = session();
        let result = set_order(&mut session, "a", 12.7).unwrap();
        assert!(result.messages[0].content.contains("set to 12"));
        assert_eq!(session.settings.get("a").unwrap().order, 12);
    }

    #[test]
    fn bulk_toggles_cover_everything() {
        let mut session = session();
        disable_all(&mut session).unwrap();
        assert!(session.settings.items().iter().all(|s| !s.enabled));
        enable_all(&mut session).unwrap();
        assert!(session.settings.items().iter().all(|s| s.enabled));
    }

    #[test]
    fn renumber_marks_dirty() {
        let mut session = session();
        renumber(&mut session, 10).unwrap();
        assert!(session.dirty);
        let orders: Vec<i64> = session.settings.items().iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![10, 20, 30]);
    }

    #[test]
    fn list_returns_all_parameters() {
        let session = session();
        assert_eq!(list(&session).unwrap().settings.len(), 3);
    }
}
