//! Wire-level records for persistence and interchange.
//!
//! These types are deliberately tolerant on the way in: every field has a
//! default so partial or hand-edited JSON still loads. Normalization into
//! the strict in-memory types happens in [`crate::model`] and
//! [`crate::settings`]; this module owns the save-boundary validation that
//! gates publishing.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ReportzError, Result};
use crate::ident;

/// A paragraph as persisted: reusable block of report text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub text: String,
}

/// A report template as persisted: title plus an ordered paragraph-id list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub paragraph_ids: Vec<String>,
}

/// Full template state: all paragraphs and all reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSnapshot {
    #[serde(default)]
    pub paragraphs: Vec<ParagraphRecord>,
    #[serde(default)]
    pub reports: Vec<ReportRecord>,
}

impl TemplateSnapshot {
    /// Save-boundary validation. Checks ids, required fields, duplicate
    /// entities and that every reference resolves. Runs before any write;
    /// the first problem found is returned.
    pub fn validate(&self) -> Result<()> {
        let mut paragraph_ids = BTreeSet::new();
        for p in &self.paragraphs {
            let id = p.id.trim();
            ident::check_id("paragraph", id)?;
            if !paragraph_ids.insert(id.to_string()) {
                return Err(ReportzError::Validation(format!(
                    "duplicate paragraph id: {id}"
                )));
            }
            if p.text.trim().is_empty() {
                return Err(ReportzError::Validation(format!(
                    "paragraph {id} has empty text"
                )));
            }
            if p.label.trim().is_empty() {
                return Err(ReportzError::Validation(format!(
                    "paragraph {id} has empty label"
                )));
            }
        }

        let mut report_ids = BTreeSet::new();
        for r in &self.reports {
            let id = r.id.trim();
            ident::check_id("report", id)?;
            if !report_ids.insert(id.to_string()) {
                return Err(ReportzError::Validation(format!(
                    "duplicate report id: {id}"
                )));
            }
            if r.title.trim().is_empty() {
                return Err(ReportzError::Validation(format!(
                    "report {id} has empty title"
                )));
            }
            let refs = ident::norm_id_list(&r.paragraph_ids);
            if refs.is_empty() {
                return Err(ReportzError::Validation(format!(
                    "report {id} has no paragraph references"
                )));
            }
            for pid in refs {
                if !paragraph_ids.contains(&pid) {
                    return Err(ReportzError::MissingParagraph {
                        report_id: id.to_string(),
                        paragraph_id: pid,
                    });
                }
            }
        }

        if self.paragraphs.is_empty() {
            return Err(ReportzError::Validation("no paragraphs defined".into()));
        }
        if self.reports.is_empty() {
            return Err(ReportzError::Validation("no reports defined".into()));
        }
        Ok(())
    }

    /// Publish-side normalization: entities sorted by id, ids and titles
    /// trimmed, reference lists trimmed and de-duplicated keeping the first
    /// occurrence. Editing keeps duplicates; published files do not.
    pub fn deduped(&self) -> TemplateSnapshot {
        let mut paragraphs: Vec<ParagraphRecord> = self
            .paragraphs
            .iter()
            .map(|p| ParagraphRecord {
                id: ident::norm_str(&p.id),
                label: ident::norm_str(&p.label),
                description: ident::norm_str(&p.description),
                text: ident::norm_str(&p.text),
            })
            .collect();
        paragraphs.sort_by(|a, b| a.id.cmp(&b.id));

        let mut reports: Vec<ReportRecord> = self
            .reports
            .iter()
            .map(|r| {
                let mut seen = BTreeSet::new();
                let paragraph_ids = ident::norm_id_list(&r.paragraph_ids)
                    .into_iter()
                    .filter(|pid| seen.insert(pid.clone()))
                    .collect();
                ReportRecord {
                    id: ident::norm_str(&r.id),
                    title: ident::norm_str(&r.title),
                    paragraph_ids,
                }
            })
            .collect();
        reports.sort_by(|a, b| a.id.cmp(&b.id));

        TemplateSnapshot {
            paragraphs,
            reports,
        }
    }
}

/// One saved display setting. `enabled` and `order` are optional on input;
/// absent or unusable values fall back to catalog defaults on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "de_order")]
    pub order: Option<i64>,
}

/// Saved display settings for the parameter catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    #[serde(default)]
    pub params: Vec<SettingRecord>,
}

/// Orders are integers on disk but tolerated as any JSON number on input.
/// Floats truncate toward zero; null and non-numbers read as absent.
fn de_order<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        _ => None,
    }))
}

/// The working draft: template and settings state of an unsaved session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub templates: TemplateSnapshot,
    #[serde(default)]
    pub settings: SettingsSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(id: &str) -> ParagraphRecord {
        ParagraphRecord {
            id: id.to_string(),
            label: format!("{id} label"),
            description: String::new(),
            text: format!("{id} text"),
        }
    }

    fn report(id: &str, refs: &[&str]) -> ReportRecord {
        ReportRecord {
            id: id.to_string(),
            title: format!("{id} title"),
            paragraph_ids: refs.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn valid() -> TemplateSnapshot {
        TemplateSnapshot {
            paragraphs: vec![paragraph("p1"), paragraph("p2")],
            reports: vec![report("r1", &["p1", "p2"])],
        }
    }

    #[test]
    fn valid_snapshot_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn missing_reference_names_both_ids() {
        let mut snap = valid();
        snap.reports[0].paragraph_ids.push("ghost".to_string());
        let err = snap.validate().unwrap_err();
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
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut snap = valid();
        snap.paragraphs.push(paragraph("p1"));
        let err = snap.validate().unwrap_err().to_string();
        assert!(err.contains("duplicate paragraph id: p1"));

        let mut snap = valid();
        snap.reports.push(report("r1", &["p1"]));
        let err = snap.validate().unwrap_err().to_string();
        assert!(err.contains("duplicate report id: r1"));
    }

    #[test]
    fn empty_fields_rejected() {
        let mut snap = valid();
        snap.paragraphs[0].text = "   ".to_string();
        assert!(snap
            .validate()
            .unwrap_err()
            .to_string()
            .contains("empty text"));

        let mut snap = valid();
        snap.reports[0].title = String::new();
        assert!(snap
            .validate()
            .unwrap_err()
            .to_string()
            .contains("empty title"));

        let mut snap = valid();
        snap.reports[0].paragraph_ids = vec!["  ".to_string()];
        assert!(snap
            .validate()
            .unwrap_err()
            .to_string()
            .contains("no paragraph references"));
    }

    #[test]
    fn bad_id_rejected() {
        let mut snap = valid();
        snap.paragraphs[0].id = "a b".to_string();
        assert!(snap
            .validate()
            .unwrap_err()
            .to_string()
            .contains("invalid paragraph id"));
    }

    #[test]
    fn empty_snapshot_rejected() {
        let err = TemplateSnapshot::default().validate().unwrap_err();
        assert!(err.to_string().contains("no paragraphs defined"));
    }

    #[test]
    fn deduped_keeps_first_occurrence() {
        let mut snap = valid();
        snap.reports[0].paragraph_ids =
            vec!["p2".into(), " p1 ".into(), "p2".into(), "".into()];
        let out = snap.deduped();
        assert_eq!(out.reports[0].paragraph_ids, vec!["p2", "p1"]);
    }

    #[test]
    fn deduped_sorts_by_id() {
        let snap = TemplateSnapshot {
            paragraphs: vec![paragraph("zz"), paragraph("aa")],
            reports: vec![report("r2", &["aa"]), report("r1", &["zz"])],
        };
        let out = snap.deduped();
        assert_eq!(out.paragraphs[0].id, "aa");
        assert_eq!(out.reports[0].id, "r1");
    }

    #[test]
    fn partial_json_loads_with_defaults() {
        let snap: TemplateSnapshot =
            serde_json::from_str(r#"{"paragraphs": [{"id": "p1"}]}"#).unwrap();
        assert_eq!(snap.paragraphs[0].id, "p1");
        assert_eq!(snap.paragraphs[0].label, "");
        assert!(snap.reports.is_empty());
    }

    #[test]
    fn order_tolerates_floats_and_garbage() {
        let snap: SettingsSnapshot = serde_json::from_str(
            r#"{"params": [
                {"name": "a", "order": 10},
                {"name": "b", "order": 12.7},
                {"name": "c", "order": null},
                {"name": "d", "order": "soon"},
                {"name": "e"}
            ]}"#,
        )
        .unwrap();
        let orders: Vec<Option<i64>> = snap.params.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![Some(10), Some(12), None, None, None]);
    }

    #[test]
    fn setting_record_serializes_integer_order() {
        let rec = SettingRecord {
            name: "LVEDD".to_string(),
            enabled: Some(true),
            order: Some(10),
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains(r#""order":10"#), "{json}");
    }
}
