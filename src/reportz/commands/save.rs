use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::EditorSession;
use crate::store::SnapshotStore;

/// Validates the session and publishes it. Validation failure leaves the
/// store and the draft untouched; only a fully successful publish clears
/// the draft and the dirty flag.
pub fn run<S: SnapshotStore>(store: &mut S, session: &mut EditorSession) -> Result<CmdResult> {
    let snapshot = session.doc.to_snapshot();
    snapshot.validate()?;

    let published = snapshot.deduped();
    store.save_templates(&published)?;
    store.save_settings(&session.settings.serialize())?;
    store.clear_draft()?;
    session.dirty = false;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Saved {} paragraph(s), {} report(s), {} parameter setting(s)",
        published.paragraphs.len(),
        published.reports.len(),
        session.settings.len(),
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::open;
    use crate::error::ReportzError;
    use crate::snapshot::{ParagraphRecord, ReportRecord};
    use crate::store::memory::InMemoryStore;

    fn session_with_basics(store: &InMemoryStore) -> EditorSession {
        let mut session = open::run(store).unwrap();
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
        session
            .doc
            .upsert_report(
                &ReportRecord {
                    id: "r1".into(),
                    title: "Report".into(),
                    paragraph_ids: vec!["p1".into(), "p1".into()],
                },
                None,
            )
            .unwrap();
        session.mark_dirty();
        session
    }

    #[test]
    fn publishes_and_clears_draft() {
        let mut store = InMemoryStore::new();
        let mut session = session_with_basics(&store);
        store.save_draft(&session.to_draft()).unwrap();

        run(&mut store, &mut session).unwrap();

        assert!(!session.dirty);
        assert!(!store.has_draft());
        let published = store.load_templates().unwrap();
        assert_eq!(published.paragraphs.len(), 1);
        // duplicate references collapse on publish
        assert_eq!(published.reports[0].paragraph_ids, vec!["p1"]);
        assert!(store.load_settings().unwrap().is_some());
    }

    #[test]
    fn missing_reference_blocks_the_save() {
        let mut store = InMemoryStore::new();
        let mut session = session_with_basics(&store);
        session.doc.add_ref("r1", "ghost");
        store.save_draft(&session.to_draft()).unwrap();

        let err = run(&mut store, &mut session).unwrap_err();
        match err {
            ReportzError::MissingParagraph {
                report_id,
                paragraph_id,
            } => {
                assert_eq!(report_id, "r1");
                assert_eq!(paragraph_id, "ghost");
            }
            other => panic!("unexpected error: {other}"),
        }

        // nothing published, draft still there, session still dirty
        assert!(store.load_templates().unwrap().paragraphs.is_empty());
        assert!(store.has_draft());
        assert!(session.dirty);
    }

    #[test]
    fn empty_session_does_not_publish() {
        let mut store = InMemoryStore::new();
        let mut session = open::run(&store).unwrap();
        assert!(run(&mut store, &mut session).is_err());
    }
}
