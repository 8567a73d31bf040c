use super::{CmdMessage, CmdResult};
use crate::error::{ReportzError, Result};
use crate::session::EditorSession;
use crate::snapshot::ParagraphRecord;

/// Adds a new paragraph. Existing ids are refused; use update to change a
/// paragraph in place.
pub fn add(session: &mut EditorSession, rec: &ParagraphRecord) -> Result<CmdResult> {
    let id = rec.id.trim().to_string();
    if session.doc.paragraph(&id).is_some() {
        return Err(ReportzError::Conflict(format!(
            "paragraph id already exists: {id}"
        )));
    }
    session.doc.upsert_paragraph(rec, None)?;
    session.mark_dirty();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Paragraph added: {id}")));
    if let Some(p) = session.doc.paragraph(&id) {
        result.paragraphs.push(p.clone());
    }
    Ok(result)
}

/// Updates a paragraph, optionally renaming it. On rename every report
/// reference follows the new id.
pub fn update(
    session: &mut EditorSession,
    previous_id: &str,
    rec: &ParagraphRecord,
) -> Result<CmdResult> {
    let previous_id = previous_id.trim();
    if session.doc.paragraph(previous_id).is_none() {
        return Err(ReportzError::Validation(format!(
            "no such paragraph: {previous_id}"
        )));
    }
    session.doc.upsert_paragraph(rec, Some(previous_id))?;
    session.mark_dirty();

    let id = rec.id.trim().to_string();
    let mut result = CmdResult::default();
    if id != previous_id {
        result.add_message(CmdMessage::info(format!(
            "Paragraph renamed: {previous_id} -> {id} (report references updated)"
        )));
    }
    result.add_message(CmdMessage::success(format!("Paragraph updated: {id}")));
    if let Some(p) = session.doc.paragraph(&id) {
        result.paragraphs.push(p.clone());
    }
    Ok(result)
}

/// Deletes a paragraph and every report reference to it. Deleting an
/// unknown id is a no-op, not an error.
pub fn delete(session: &mut EditorSession, id: &str) -> Result<CmdResult> {
    let id = id.trim();
    let mut result = CmdResult::default();
    if session.doc.paragraph(id).is_none() {
        result.add_message(CmdMessage::info(format!(
            "No such paragraph: {id} (nothing to delete)"
        )));
        return Ok(result);
    }

    let removed_refs: usize = session
        .doc
        .reports()
        .map(|r| r.paragraph_ids.iter().filter(|pid| *pid == id).count())
        .sum();
    session.doc.delete_paragraph(id);
    session.mark_dirty();

    if removed_refs > 0 {
        result.add_message(CmdMessage::success(format!(
            "Paragraph deleted: {id} ({removed_refs} report reference(s) removed)"
        )));
    } else {
        result.add_message(CmdMessage::success(format!("Paragraph deleted: {id}")));
    }
    Ok(result)
}

/// Lists paragraphs, optionally filtered by a case-insensitive substring
/// over id, label, description and text.
pub fn list(session: &EditorSession, search: Option<&str>) -> Result<CmdResult> {
    let paragraphs = session
        .doc
        .filter_paragraphs(search.unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();
    Ok(CmdResult::default().with_paragraphs(paragraphs))
}

/// One paragraph in full.
pub fn show(session: &EditorSession, id: &str) -> Result<CmdResult> {
    let p = session
        .doc
        .paragraph(id)
        .ok_or_else(|| ReportzError::Validation(format!("no such paragraph: {}", id.trim())))?;
    Ok(CmdResult::default().with_paragraphs(vec![p.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ReportRecord;

    fn rec(id: &str, label: &str, text: &str) -> ParagraphRecord {
        ParagraphRecord {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            text: text.into(),
        }
    }

    fn session() -> EditorSession {
        let mut session = EditorSession::default();
        add(&mut session, &rec("p1", "One", "First.")).unwrap();
        add(&mut session, &rec("p2", "Two", "Second.")).unwrap();
        session
            .doc
            .upsert_report(
                &ReportRecord {
                    id: "r1".into(),
                    title: "R".into(),
                    paragraph_ids: vec!["p1".into(), "p2".into(), "p1".into()],
                },
                None,
            )
            .unwrap();
        session
    }

    #[test]
    fn add_refuses_existing_id() {
        let mut session = session();
        let err = add(&mut session, &rec("p1", "Again", "Dup.")).unwrap_err();
        assert!(matches!(err, ReportzError::Conflict(_)));
        // the original paragraph is untouched
        assert_eq!(session.doc.paragraph("p1").unwrap().label, "One");
    }

    #[test]
    fn add_marks_session_dirty() {
        let mut session = EditorSession::default();
        assert!(!session.dirty);
        add(&mut session, &rec("p1", "One", "Text.")).unwrap();
        assert!(session.dirty);
    }

    #[test]
    fn update_unknown_paragraph_fails() {
        let mut session = session();
        let err = update(&mut session, "ghost", &rec("ghost", "G", "g")).unwrap_err();
        assert!(err.to_string().contains("no such paragraph"));
    }

    #[test]
    fn update_with_rename_reports_the_cascade() {
        let mut session = session();
        let result = update(&mut session, "p1", &rec("p1x", "One", "First.")).unwrap();
        assert!(result.messages[0].content.contains("p1 -> p1x"));
        assert_eq!(
            session.doc.report("r1").unwrap().paragraph_ids,
            vec!["p1x", "p2", "p1x"]
        );
    }

    #[test]
    fn delete_is_idempotent() {
        let mut session = session();
        let result = delete(&mut session, "p1").unwrap();
        assert!(result.messages[0].content.contains("2 report reference(s)"));

        session.dirty = false;
        let result = delete(&mut session, "p1").unwrap();
        assert!(result.messages[0].content.contains("nothing to delete"));
        // a no-op delete does not dirty the session
        assert!(!session.dirty);
    }

    #[test]
    fn list_filters() {
        let session = session();
        assert_eq!(list(&session, None).unwrap().paragraphs.len(), 2);
        assert_eq!(list(&session, Some("second")).unwrap().paragraphs.len(), 1);
    }

    #[test]
    fn show_unknown_paragraph_fails() {
        let session = session();
        assert!(show(&session, "ghost").is_err());
        assert_eq!(show(&session, "p1").unwrap().paragraphs[0].id, "p1");
    }
}
