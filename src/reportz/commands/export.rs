use super::CmdResult;
use crate::error::Result;
use crate::session::EditorSession;

/// Renders the display settings as paste-ready text: two comment header
/// lines, then one block per parameter in canonical (order, name) order.
pub fn run(session: &EditorSession) -> Result<CmdResult> {
    Ok(CmdResult::default().with_text(session.settings.export_text()))
}
