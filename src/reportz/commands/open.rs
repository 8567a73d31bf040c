use crate::error::Result;
use crate::model::TemplateDoc;
use crate::session::EditorSession;
use crate::settings::SettingsModel;
use crate::store::SnapshotStore;

/// Opens an editing session. A leftover draft takes precedence over
/// published state and the session starts dirty; otherwise the session
/// reflects what is published.
pub fn run<S: SnapshotStore>(store: &S) -> Result<EditorSession> {
    let catalog = store.load_catalog()?;

    if let Some(draft) = store.load_draft()? {
        return Ok(EditorSession {
            doc: TemplateDoc::from_snapshot(&draft.templates),
            settings: SettingsModel::load(&catalog, &draft.settings),
            dirty: true,
        });
    }

    let templates = store.load_templates()?;
    let settings = store.load_settings()?.unwrap_or_default();
    Ok(EditorSession {
        doc: TemplateDoc::from_snapshot(&templates),
        settings: SettingsModel::load(&catalog, &settings),
        dirty: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ParagraphRecord, SessionSnapshot, TemplateSnapshot};
    use crate::store::memory::InMemoryStore;

    fn paragraph(id: &str) -> ParagraphRecord {
        ParagraphRecord {
            id: id.into(),
            label: id.into(),
            description: String::new(),
            text: "text".into(),
        }
    }

    #[test]
    fn opens_published_state_clean() {
        let store = InMemoryStore::new().with_templates(TemplateSnapshot {
            paragraphs: vec![paragraph("p1")],
            reports: vec![],
        });
        let session = run(&store).unwrap();
        assert!(!session.dirty);
        assert_eq!(session.doc.paragraph_count(), 1);
        // settings seeded from the default catalog
        assert!(!session.settings.is_empty());
    }

    #[test]
    fn draft_wins_over_published_state() {
        let mut store = InMemoryStore::new().with_templates(TemplateSnapshot {
            paragraphs: vec![paragraph("published")],
            reports: vec![],
        });
        store
            .save_draft(&SessionSnapshot {
                templates: TemplateSnapshot {
                    paragraphs: vec![paragraph("drafted")],
                    reports: vec![],
                },
                settings: Default::default(),
            })
            .unwrap();

        let session = run(&store).unwrap();
        assert!(session.dirty);
        assert!(session.doc.paragraph("drafted").is_some());
        assert!(session.doc.paragraph("published").is_none());
    }
}
