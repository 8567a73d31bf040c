use super::{CmdMessage, CmdResult};
use crate::error::{ReportzError, Result};
use crate::session::EditorSession;

/// Assembles a report's text: the referenced paragraph bodies in list
/// order, joined by blank lines. Unresolved references are skipped with a
/// warning so a half-built draft can still be previewed.
pub fn run(session: &EditorSession, report_id: &str) -> Result<CmdResult> {
    let report = session
        .doc
        .report(report_id)
        .ok_or_else(|| ReportzError::Validation(format!("no such report: {}", report_id.trim())))?;

    let mut result = CmdResult::default();
    let mut chunks = Vec::new();
    for pid in &report.paragraph_ids {
        match session.doc.paragraph(pid) {
            Some(p) => chunks.push(p.text.as_str()),
            None => result.add_message(CmdMessage::warning(format!(
                "skipping missing paragraph: {pid}"
            ))),
        }
    }
    result.text = Some(chunks.join("\n\n"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ParagraphRecord, ReportRecord};

    fn session() -> EditorSession {
        let mut session = EditorSession::default();
        for (id, text) in [("p1", "First."), ("p2", "Second.")] {
            session
                .doc
                .upsert_paragraph(
                    &ParagraphRecord {
                        id: id.into(),
                        label: id.into(),
                        description: String::new(),
                        text: text.into(),
                    },
                    None,
                )
                .unwrap();
        }
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
    fn joins_paragraphs_in_reference_order() {
        let result = run(&session(), "r1").unwrap();
        assert_eq!(result.text.as_deref(), Some("First.\n\nSecond.\n\nFirst."));
    }

    #[test]
    fn skips_missing_references_with_a_warning() {
        let mut session = session();
        session.doc.add_ref("r1", "ghost");
        let result = run(&session, "r1").unwrap();
        assert_eq!(result.text.as_deref(), Some("First.\n\nSecond.\n\nFirst."));
        assert!(result.messages[0].content.contains("ghost"));
    }

    #[test]
    fn unknown_report_fails() {
        assert!(run(&session(), "nope").is_err());
    }
}
