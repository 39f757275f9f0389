use thiserror::Error;

/// Error types for the ld50-rs library.
#[derive(Error, Debug)]
pub enum Ld50Error {
    /// Error indicating a mismatch in column lengths.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Invalid observation values.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Too few observations for a meaningful fit.
    #[error("Insufficient data: need {required} observations, got {found}")]
    InsufficientData { required: usize, found: usize },

    /// A required column is absent from the table header.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A data row could not be parsed.
    #[error("Malformed row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    /// CSV reader error wrapper.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for cases that don't fit the other categories.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for ld50-rs operations.
pub type Result<T> = std::result::Result<T, Ld50Error>;

impl From<String> for Ld50Error {
    fn from(s: String) -> Self {
        Ld50Error::Other(s)
    }
}

impl From<&str> for Ld50Error {
    fn from(s: &str) -> Self {
        Ld50Error::Other(s.to_string())
    }
}
