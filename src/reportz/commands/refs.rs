//! Reference edits: the ordered paragraph list inside a report.

use super::{CmdMessage, CmdResult};
use crate::error::{ReportzError, Result};
use crate::session::EditorSession;

/// Appends a paragraph reference to a report. Repeats are allowed, and the
/// paragraph does not have to exist until save.
pub fn attach(
    session: &mut EditorSession,
    report_id: &str,
    paragraph_id: &str,
) -> Result<CmdResult> {
    let report_id = report_id.trim();
    let paragraph_id = paragraph_id.trim();
    ensure_report(session, report_id)?;
    if paragraph_id.is_empty() {
        return Err(ReportzError::Validation("paragraph id is empty".into()));
    }

    session.doc.add_ref(report_id, paragraph_id);
    session.mark_dirty();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {paragraph_id} to {report_id}"
    )));
    if session.doc.paragraph(paragraph_id).is_none() {
        result.add_message(CmdMessage::warning(format!(
            "paragraph {paragraph_id} does not exist yet (save will fail until it does)"
        )));
    }
    Ok(result)
}

/// Removes every occurrence of a paragraph reference from a report.
pub fn detach(
    session: &mut EditorSession,
    report_id: &str,
    paragraph_id: &str,
) -> Result<CmdResult> {
    let report_id = report_id.trim();
    let paragraph_id = paragraph_id.trim();
    ensure_report(session, report_id)?;

    let before = ref_count(session, report_id, paragraph_id);
    session.doc.remove_ref(report_id, paragraph_id);

    let mut result = CmdResult::default();
    if before == 0 {
        result.add_message(CmdMessage::info(format!(
            "{paragraph_id} was not referenced by {report_id}"
        )));
    } else {
        session.mark_dirty();
        result.add_message(CmdMessage::success(format!(
            "Removed {paragraph_id} from {report_id} ({before} occurrence(s))"
        )));
    }
    Ok(result)
}

/// Moves a paragraph reference to the end of the report. This is the only
/// reorder; building any other order is done by detaching and re-attaching
/// in the desired sequence.
pub fn tail(session: &mut EditorSession, report_id: &str, paragraph_id: &str) -> Result<CmdResult> {
    let report_id = report_id.trim();
    let paragraph_id = paragraph_id.trim();
    ensure_report(session, report_id)?;

    let mut result = CmdResult::default();
    if ref_count(session, report_id, paragraph_id) == 0 {
        result.add_message(CmdMessage::info(format!(
            "{paragraph_id} is not referenced by {report_id}"
        )));
        return Ok(result);
    }

    session.doc.move_ref_to_end(report_id, paragraph_id);
    session.mark_dirty();
    result.add_message(CmdMessage::success(format!(
        "Moved {paragraph_id} to the end of {report_id}"
    )));
    Ok(result)
}

fn ensure_report(session: &EditorSession, report_id: &str) -> Result<()> {
    if session.doc.report(report_id).is_none() {
        return Err(ReportzError::Validation(format!(
            "no such report: {report_id}"
        )));
    }
    Ok(())
}

fn ref_count(session: &EditorSession, report_id: &str, paragraph_id: &str) -> usize {
    session
        .doc
        .report(report_id)
        .map(|r| r.paragraph_ids.iter().filter(|p| *p == paragraph_id).count())
        .unwrap_or(0)
}
