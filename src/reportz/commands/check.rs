use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::EditorSession;

/// Runs the save-boundary validation without publishing. Returns the first
/// problem found, exactly as save would.
pub fn run(session: &EditorSession) -> Result<CmdResult> {
    session.doc.to_snapshot().validate()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "OK: {} paragraph(s), {} report(s), all references resolve",
        session.doc.paragraph_count(),
        session.doc.report_count(),
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ParagraphRecord, ReportRecord};

    #[test]
    fn reports_ok_for_a_consistent_session() {
        let mut session = EditorSession::default();
        session
            .doc
            .upsert_paragraph(
                &ParagraphRecord {
                    id: "p1".into(),
                    label: "One".into(),
                    description: String::new(),
                    text: "Text.".into(),
                },
                None,
            )
            .unwrap();
        session
            .doc
            .upsert_report(
                &ReportRecord {
                    id: "r1".into(),
                    title: "R".into(),
                    paragraph_ids: vec!["p1".into()],
                },
                None,
            )
            .unwrap();

        let result = run(&session).unwrap();
        assert!(result.messages[0].content.contains("all references resolve"));
    }

    #[test]
    fn surfaces_the_first_validation_problem() {
        let session = EditorSession::default();
        let err = run(&session).unwrap_err();
        assert!(err.to_string().contains("no paragraphs defined"));
    }
}
