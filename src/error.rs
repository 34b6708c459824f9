//! Error handling for the ATS insight engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsInsightError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Empty content: {0}")]
    EmptyContent(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("History store error: {0}")]
    HistoryStore(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, AtsInsightError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for AtsInsightError {
    fn from(err: anyhow::Error) -> Self {
        AtsInsightError::AnalysisFailed(err.to_string())
    }
}
