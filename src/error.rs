use thiserror::Error;

// Error types for the product finder
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid number of travellers: {0} (must be at least 1)")]
    InvalidParty(i64),

    #[error("Invalid {name} '{value}': expected format YYYY-MM-DDTHH:MM")]
    InvalidTimestamp { name: String, value: String },

    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response code is not expected: {0}")]
    UnexpectedStatus(u16),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FinderError {
    // Prefix a record error with the position of the record in the document
    pub fn at_record(self, index: usize) -> Self {
        match self {
            FinderError::MalformedRecord(reason) => {
                FinderError::MalformedRecord(format!("#{}: {}", index, reason))
            }
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
