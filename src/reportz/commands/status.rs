use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::EditorSession;

/// Session overview: entity counts and whether there is an unpublished
/// draft.
pub fn run(session: &EditorSession) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "{} paragraph(s), {} report(s), {} parameter(s)",
        session.doc.paragraph_count(),
        session.doc.report_count(),
        session.settings.len(),
    )));
    if session.dirty {
        result.add_message(CmdMessage::warning(
            "Unsaved draft changes (save to publish, discard to drop)",
        ));
    } else {
        result.add_message(CmdMessage::info("No unsaved changes"));
    }
    result.dirty = Some(session.dirty);
    Ok(result)
}
