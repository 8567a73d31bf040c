use super::{CmdMessage, CmdResult, RefEntry, ReportDetail};
use crate::error::{ReportzError, Result};
use crate::session::EditorSession;
use crate::snapshot::ReportRecord;

/// Adds a new report. Existing ids are refused. References may name
/// paragraphs that do not exist yet; those surface as warnings and are
/// checked for real on save.
pub fn add(session: &mut EditorSession, rec: &ReportRecord) -> Result<CmdResult> {
    let id = rec.id.trim().to_string();
    if session.doc.report(&id).is_some() {
        return Err(ReportzError::Conflict(format!(
            "report id already exists: {id}"
        )));
    }
    session.doc.upsert_report(rec, None)?;
    session.mark_dirty();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Report added: {id}")));
    warn_unresolved(session, &id, &mut result);
    if let Some(r) = session.doc.report(&id) {
        result.reports.push(r.clone());
    }
    Ok(result)
}

/// Updates a report's title or id. The reference list is left alone unless
/// the caller passes a replacement.
pub fn update(
    session: &mut EditorSession,
    previous_id: &str,
    rec: &ReportRecord,
) -> Result<CmdResult> {
    let previous_id = previous_id.trim();
    if session.doc.report(previous_id).is_none() {
        return Err(ReportzError::Validation(format!(
            "no such report: {previous_id}"
        )));
    }
    session.doc.upsert_report(rec, Some(previous_id))?;
    session.mark_dirty();

    let id = rec.id.trim().to_string();
    let mut result = CmdResult::default();
    if id != previous_id {
        result.add_message(CmdMessage::info(format!(
            "Report renamed: {previous_id} -> {id}"
        )));
    }
    result.add_message(CmdMessage::success(format!("Report updated: {id}")));
    warn_unresolved(session, &id, &mut result);
    if let Some(r) = session.doc.report(&id) {
        result.reports.push(r.clone());
    }
    Ok(result)
}

/// Deletes a report. Paragraphs are never touched by this. Deleting an
/// unknown id is a no-op.
pub fn delete(session: &mut EditorSession, id: &str) -> Result<CmdResult> {
    let id = id.trim();
    let mut result = CmdResult::default();
    if session.doc.report(id).is_none() {
        result.add_message(CmdMessage::info(format!(
            "No such report: {id} (nothing to delete)"
        )));
        return Ok(result);
    }
    session.doc.delete_report(id);
    session.mark_dirty();
    result.add_message(CmdMessage::success(format!("Report deleted: {id}")));
    Ok(result)
}

/// Lists reports, optionally filtered over id and title.
pub fn list(session: &EditorSession, search: Option<&str>) -> Result<CmdResult> {
    let reports = session
        .doc
        .filter_reports(search.unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();
    Ok(CmdResult::default().with_reports(reports))
}

/// One report with its references resolved for display.
pub fn show(session: &EditorSession, id: &str) -> Result<CmdResult> {
    let report = session
        .doc
        .report(id)
        .ok_or_else(|| ReportzError::Validation(format!("no such report: {}", id.trim())))?;

    let entries = report
        .paragraph_ids
        .iter()
        .map(|pid| RefEntry {
            paragraph_id: pid.clone(),
            label: session.doc.paragraph(pid).map(|p| p.label.clone()),
        })
        .collect();

    Ok(CmdResult::default().with_details(vec![ReportDetail {
        report: report.clone(),
        entries,
    }]))
}

fn warn_unresolved(session: &EditorSession, report_id: &str, result: &mut CmdResult) {
    if let Some(report) = session.doc.report(report_id) {
        for pid in &report.paragraph_ids {
            if session.doc.paragraph(pid).is_none() {
                result.add_message(CmdMessage::warning(format!(
                    "paragraph {pid} does not exist yet (save will fail until it does)"
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ParagraphRecord;

    fn rep(id: &str, title: &str, refs: &[&str]) -> ReportRecord {
        ReportRecord {
            id: id.into(),
            title: title.into(),
            paragraph_ids: refs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn session() -> EditorSession {
        let mut session = EditorSession::default();
        session
            .doc
            .upsert_paragraph(
                &ParagraphRecord {
                    id: "p1".into(),
                    label: "One".into(),
                    description: String::new(),
                    text: "First.".into(),
                },
                None,
            )
            .unwrap();
        add(&mut session, &rep("r1", "Report", &["p1"])).unwrap();
        session
    }

    #[test]
    fn add_refuses_existing_id() {
        let mut session = session();
        let err = add(&mut session, &rep("r1", "Again", &[])).unwrap_err();
        assert!(matches!(err, ReportzError::Conflict(_)));
    }

    #[test]
    fn add_warns_about_unresolved_references() {
        let mut session = session();
        let result = add(&mut session, &rep("r2", "Second", &["p1", "ghost"])).unwrap();
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("ghost does not exist yet")));
    }

    #[test]
    fn update_renames_without_touching_refs() {
        let mut session = session();
        let result = update(&mut session, "r1", &rep("r1x", "Report", &["p1"])).unwrap();
        assert!(result.messages[0].content.contains("r1 -> r1x"));
        assert!(session.doc.report("r1").is_none());
        assert_eq!(session.doc.report("r1x").unwrap().paragraph_ids, vec!["p1"]);
    }

    #[test]
    fn delete_is_idempotent_and_spares_paragraphs() {
        let mut session = session();
        delete(&mut session, "r1").unwrap();
        assert!(session.doc.report("r1").is_none());
        assert!(session.doc.paragraph("p1").is_some());

        let result = delete(&mut session, "r1").unwrap();
        assert!(result.messages[0].content.contains("nothing to delete"));
    }

    #[test]
    fn show_resolves_labels_and_flags_missing() {
        let mut session = session();
        session.doc.add_ref("r1", "ghost");
        let result = show(&session, "r1").unwrap();
        let detail = &result.details[0];
        assert_eq!(detail.entries.len(), 2);
        assert_eq!(detail.entries[0].label.as_deref(), Some("One"));
        assert!(detail.entries[1].label.is_none());
    }

    #[test]
    fn list_filters_by_title() {
        let session = session();
        assert_eq!(list(&session, Some("report")).unwrap().reports.len(), 1);
        assert_eq!(list(&session, Some("zzz")).unwrap().reports.len(), 0);
    }
}
