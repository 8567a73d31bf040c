//! In-memory template document: paragraphs and the reports that arrange
//! them.
//!
//! Paragraphs are reusable text blocks keyed by id. Reports hold an ordered
//! list of paragraph ids; the list may reference a paragraph more than once
//! and may name ids that do not exist yet. Editing is permissive on
//! cross-references, the save boundary (`TemplateSnapshot::validate`) is
//! strict.

use std::collections::BTreeMap;

use crate::error::{ReportzError, Result};
use crate::ident;
use crate::snapshot::{ParagraphRecord, ReportRecord, TemplateSnapshot};

/// A reusable block of report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub id: String,
    /// Short display name, never empty.
    pub label: String,
    pub description: String,
    pub text: String,
}

/// A report template: ordered paragraph references under a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: String,
    /// Display title, never empty.
    pub title: String,
    /// Ordered, duplicates allowed, unresolved ids allowed until save.
    pub paragraph_ids: Vec<String>,
}

/// The template document. Entities are kept keyed by id, so snapshots come
/// out in ascending id order without an extra sort.
#[derive(Debug, Clone, Default)]
pub struct TemplateDoc {
    paragraphs: BTreeMap<String, Paragraph>,
    reports: BTreeMap<String, Report>,
}

impl TemplateDoc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from stored records, normalizing as it goes:
    /// ids and fields are trimmed, records with blank ids are skipped,
    /// blank labels and titles fall back to the id, and when two records
    /// share an id the later one wins.
    pub fn from_snapshot(snapshot: &TemplateSnapshot) -> Self {
        let mut doc = Self::new();
        for rec in &snapshot.paragraphs {
            let id = rec.id.trim();
            if id.is_empty() {
                continue;
            }
            doc.paragraphs.insert(
                id.to_string(),
                Paragraph {
                    id: id.to_string(),
                    label: ident::or_id(&rec.label, id),
                    description: ident::norm_str(&rec.description),
                    text: ident::norm_str(&rec.text),
                },
            );
        }
        for rec in &snapshot.reports {
            let id = rec.id.trim();
            if id.is_empty() {
                continue;
            }
            doc.reports.insert(
                id.to_string(),
                Report {
                    id: id.to_string(),
                    title: ident::or_id(&rec.title, id),
                    paragraph_ids: ident::norm_id_list(&rec.paragraph_ids),
                },
            );
        }
        doc
    }

    /// Serializes the document with entities in ascending id order.
    pub fn to_snapshot(&self) -> TemplateSnapshot {
        TemplateSnapshot {
            paragraphs: self
                .paragraphs
                .values()
                .map(|p| ParagraphRecord {
                    id: p.id.clone(),
                    label: p.label.clone(),
                    description: p.description.clone(),
                    text: p.text.clone(),
                })
                .collect(),
            reports: self
                .reports
                .values()
                .map(|r| ReportRecord {
                    id: r.id.clone(),
                    title: r.title.clone(),
                    paragraph_ids: r.paragraph_ids.clone(),
                })
                .collect(),
        }
    }

    /// Inserts or replaces a paragraph. With `previous_id` set to a
    /// different id this is a rename: the old entry is removed and every
    /// occurrence of the old id in every report follows the rename.
    /// Validation happens before any mutation.
    pub fn upsert_paragraph(
        &mut self,
        rec: &ParagraphRecord,
        previous_id: Option<&str>,
    ) -> Result<()> {
        let id = rec.id.trim().to_string();
        ident::check_id("paragraph", &id)?;
        let label = rec.label.trim().to_string();
        if label.is_empty() {
            return Err(ReportzError::Validation(format!(
                "paragraph {id} has empty label"
            )));
        }
        let text = rec.text.trim().to_string();
        if text.is_empty() {
            return Err(ReportzError::Validation(format!(
                "paragraph {id} has empty text"
            )));
        }

        let previous = previous_id.map(str::trim).filter(|p| !p.is_empty());
        if let Some(prev) = previous {
            if prev != id {
                if self.paragraphs.contains_key(&id) {
                    return Err(ReportzError::Conflict(format!(
                        "paragraph id already exists: {id}"
                    )));
                }
                self.paragraphs.remove(prev);
                for report in self.reports.values_mut() {
                    for pid in report.paragraph_ids.iter_mut() {
                        if pid == prev {
                            *pid = id.clone();
                        }
                    }
                }
            }
        }

        self.paragraphs.insert(
            id.clone(),
            Paragraph {
                id,
                label,
                description: rec.description.trim().to_string(),
                text,
            },
        );
        Ok(())
    }

    /// Inserts or replaces a report. Rename semantics mirror
    /// [`Self::upsert_paragraph`] except nothing references reports, so no
    /// cascade. Paragraph ids are normalized but not resolved.
    pub fn upsert_report(&mut self, rec: &ReportRecord, previous_id: Option<&str>) -> Result<()> {
        let id = rec.id.trim().to_string();
        ident::check_id("report", &id)?;
        let title = rec.title.trim().to_string();
        if title.is_empty() {
            return Err(ReportzError::Validation(format!(
                "report {id} has empty title"
            )));
        }

        let previous = previous_id.map(str::trim).filter(|p| !p.is_empty());
        if let Some(prev) = previous {
            if prev != id {
                if self.reports.contains_key(&id) {
                    return Err(ReportzError::Conflict(format!(
                        "report id already exists: {id}"
                    )));
                }
                self.reports.remove(prev);
            }
        }

        self.reports.insert(
            id.clone(),
            Report {
                id,
                title,
                paragraph_ids: ident::norm_id_list(&rec.paragraph_ids),
            },
        );
        Ok(())
    }

    /// Removes a paragraph and every reference to it from every report.
    /// Unknown ids are a no-op.
    pub fn delete_paragraph(&mut self, id: &str) {
        let id = id.trim();
        if id.is_empty() {
            return;
        }
        self.paragraphs.remove(id);
        for report in self.reports.values_mut() {
            report.paragraph_ids.retain(|pid| pid != id);
        }
    }

    /// Removes a report. Unknown ids are a no-op.
    pub fn delete_report(&mut self, id: &str) {
        self.reports.remove(id.trim());
    }

    /// Appends a paragraph reference to a report. The paragraph does not
    /// have to exist and repeats are allowed. Unknown reports and blank
    /// paragraph ids are a no-op.
    pub fn add_ref(&mut self, report_id: &str, paragraph_id: &str) {
        let pid = paragraph_id.trim();
        if pid.is_empty() {
            return;
        }
        if let Some(report) = self.reports.get_mut(report_id.trim()) {
            report.paragraph_ids.push(pid.to_string());
        }
    }

    /// Removes every occurrence of a paragraph reference from a report.
    pub fn remove_ref(&mut self, report_id: &str, paragraph_id: &str) {
        let pid = paragraph_id.trim();
        if let Some(report) = self.reports.get_mut(report_id.trim()) {
            report.paragraph_ids.retain(|p| p != pid);
        }
    }

    /// Moves a reference to the end of a report's list. All occurrences
    /// collapse into a single trailing one. No-op when the reference is
    /// absent.
    pub fn move_ref_to_end(&mut self, report_id: &str, paragraph_id: &str) {
        let pid = paragraph_id.trim();
        if let Some(report) = self.reports.get_mut(report_id.trim()) {
            let before = report.paragraph_ids.len();
            report.paragraph_ids.retain(|p| p != pid);
            if report.paragraph_ids.len() < before {
                report.paragraph_ids.push(pid.to_string());
            }
        }
    }

    pub fn paragraph(&self, id: &str) -> Option<&Paragraph> {
        self.paragraphs.get(id.trim())
    }

    pub fn report(&self, id: &str) -> Option<&Report> {
        self.reports.get(id.trim())
    }

    /// Paragraphs in ascending id order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.values()
    }

    /// Reports in ascending id order.
    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.reports.values()
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn report_count(&self) -> usize {
        self.reports.len()
    }

    /// Case-insensitive substring match over id, label, description and
    /// text. A blank query matches everything.
    pub fn filter_paragraphs(&self, query: &str) -> Vec<&Paragraph> {
        let needle = query.trim().to_lowercase();
        self.paragraphs()
            .filter(|p| {
                needle.is_empty() || {
                    let hay = format!("{} {} {} {}", p.id, p.label, p.description, p.text)
                        .to_lowercase();
                    hay.contains(&needle)
                }
            })
            .collect()
    }

    /// Case-insensitive substring match over id, title and the referenced
    /// paragraph ids, so a report can be found by what it contains.
    pub fn filter_reports(&self, query: &str) -> Vec<&Report> {
        let needle = query.trim().to_lowercase();
        self.reports()
            .filter(|r| {
                needle.is_empty() || {
                    let hay = format!("{} {} {}", r.id, r.title, r.paragraph_ids.join(" "))
                        .to_lowercase();
                    hay.contains(&needle)
                }
            })
            .collect()
    }
}
