use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Fetch of {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl ScanError {
    pub fn invalid_seed(url: &str, reason: impl ToString) -> Self {
        ScanError::InvalidSeed {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        ScanError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
