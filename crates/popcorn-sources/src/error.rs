use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("movie database returned HTTP {status}")]
    Status { status: u16 },

    /// The API answered but said it has nothing for the request.
    #[error("no results: {0}")]
    NotFound(String),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}
