use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by corpus loading, frequency caching, scoring and sampling
#[derive(Debug, Error)]
pub enum WordError {
    /// Level or length bounds violate their ordering or domain
    #[error("out of range: {0}")]
    OutOfRange(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("letter frequency cache not found at {}", .0.display())]
    MissingCache(PathBuf),
    #[error("letter '{0}' has no entry in the frequency table")]
    UnknownLetter(char),
    #[error("division by zero: {0}")]
    DivisionByZero(String),
    #[error("no words could be chosen with the given constraints")]
    NoWordsFound,
    #[error("cannot compute letter frequencies from a corpus without letters")]
    EmptyCorpus,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, WordError>;
