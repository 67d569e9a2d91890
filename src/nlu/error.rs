//! NLU error types

use thiserror::Error;

/// The classify call could not complete. Every variant is recoverable:
/// the turn proceeds as if the intent were unmatched.
#[derive(Debug, Error)]
pub enum NluError {
    #[error("NLU request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("NLU returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("NLU response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
