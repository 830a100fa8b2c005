use thiserror::Error;

/// Failure of a single query exchange
///
/// The chat controller treats every variant the same way; the split only
/// exists so logs say what went wrong.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
}
