use thiserror::Error;

/// Errors for reportz operations.
#[derive(Error, Debug)]
pub enum ReportzError {
    /// Malformed id or empty required field. The model is left untouched.
    #[error("{0}")]
    Validation(String),

    /// Id collision on insert or rename. The model is left untouched.
    #[error("{0}")]
    Conflict(String),

    /// A report names a paragraph that does not exist. Raised at the save
    /// boundary, never while editing.
    #[error("report {report_id} references missing paragraph: {paragraph_id}")]
    MissingParagraph {
        report_id: String,
        paragraph_id: String,
    },

    /// Could not launch or finish an external editor session.
    #[error("editor error: {0}")]
    Editor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Store(String),
}

/// Convenience result type for reportz operations.
pub type Result<T> = std::result::Result<T, ReportzError>;
