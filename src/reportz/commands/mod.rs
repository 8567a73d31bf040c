use crate::model::{Paragraph, Report};
use crate::settings::Setting;

pub mod check;
pub mod export;
pub mod init;
pub mod open;
pub mod paragraph;
pub mod refs;
pub mod render;
pub mod report;
pub mod save;
pub mod settings;
pub mod status;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A report with its references resolved for display: each entry carries
/// the paragraph label, or `None` when the paragraph does not exist yet.
#[derive(Debug, Clone)]
pub struct ReportDetail {
    pub report: Report,
    pub entries: Vec<RefEntry>,
}

#[derive(Debug, Clone)]
pub struct RefEntry {
    pub paragraph_id: String,
    pub label: Option<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub paragraphs: Vec<Paragraph>,
    pub reports: Vec<Report>,
    pub details: Vec<ReportDetail>,
    pub settings: Vec<Setting>,
    /// Raw text payload (rendered report, settings export).
    pub text: Option<String>,
    /// Session dirty flag, set by status.
    pub dirty: Option<bool>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_paragraphs(mut self, paragraphs: Vec<Paragraph>) -> Self {
        self.paragraphs = paragraphs;
        self
    }

    pub fn with_reports(mut self, reports: Vec<Report>) -> Self {
        self.reports = reports;
        self
    }

    pub fn with_details(mut self, details: Vec<ReportDetail>) -> Self {
        self.details = details;
        self
    }

    pub fn with_settings(mut self, settings: Vec<Setting>) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
