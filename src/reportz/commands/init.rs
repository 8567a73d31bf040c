use super::{save, CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::EditorSession;
use crate::snapshot::{ParagraphRecord, ReportRecord};
use crate::store::SnapshotStore;

const STARTER_PARAGRAPH_ID: &str = "norms";
const STARTER_PARAGRAPH_LABEL: &str = "Norms / source";
const STARTER_PARAGRAPH_TEXT: &str =
    "Norms: Pettersen MD et al., J Am Soc Echocardiogr 2008;21(8):922-34 (z-scores, Detroit data).";
const DEFAULT_REPORT_ID: &str = "default_echo";
const DEFAULT_REPORT_TITLE: &str = "Default";

/// Seeds an empty store with a starter paragraph and a default report,
/// then publishes. A store that already has reports is left alone.
pub fn run<S: SnapshotStore>(store: &mut S, session: &mut EditorSession) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if session.doc.report_count() > 0 {
        result.add_message(CmdMessage::info(
            "Store already has reports, nothing to initialize",
        ));
        return Ok(result);
    }

    if session.doc.paragraph_count() == 0 {
        session.doc.upsert_paragraph(
            &ParagraphRecord {
                id: STARTER_PARAGRAPH_ID.to_string(),
                label: STARTER_PARAGRAPH_LABEL.to_string(),
                description: String::new(),
                text: STARTER_PARAGRAPH_TEXT.to_string(),
            },
            None,
        )?;
        result.add_message(CmdMessage::info(format!(
            "Created starter paragraph: {STARTER_PARAGRAPH_ID}"
        )));
    }

    // the default report points at whatever paragraph sorts first
    let first_pid = session
        .doc
        .paragraphs()
        .next()
        .map(|p| p.id.clone())
        .unwrap_or_else(|| STARTER_PARAGRAPH_ID.to_string());
    session.doc.upsert_report(
        &ReportRecord {
            id: DEFAULT_REPORT_ID.to_string(),
            title: DEFAULT_REPORT_TITLE.to_string(),
            paragraph_ids: vec![first_pid],
        },
        None,
    )?;
    result.add_message(CmdMessage::info(format!(
        "Created default report: {DEFAULT_REPORT_ID}"
    )));
    session.mark_dirty();

    let saved = save::run(store, session)?;
    result.messages.extend(saved.messages);
    result.add_message(CmdMessage::success("Store initialized"));
    Ok(result)
}
