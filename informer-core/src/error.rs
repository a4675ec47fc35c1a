use thiserror::Error;

/// Every way a fetch can fail. `Cancelled` is an expected outcome, not a failure to report.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request was superseded by a newer one")]
    Cancelled,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("weather service responded with status {0}")]
    Server(u16),

    #[error("weather service returned an empty response")]
    EmptyResponse,

    #[error("failed to decode weather response: {0}")]
    Decoding(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}
