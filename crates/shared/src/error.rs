use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown whenever a failed response carries no usable `message`.
pub const ANALYSIS_FAILED: &str = "Analysis failed";

/// Error body returned by the analyze endpoint on a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiError {
    /// Human-readable failure text for a raw error body. Falls back to
    /// [`ANALYSIS_FAILED`] when the body is not JSON, has no `message`, or the
    /// message is empty.
    pub fn message_from_body(body: &[u8]) -> String {
        serde_json::from_slice::<ApiError>(body)
            .ok()
            .and_then(|err| err.message)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| ANALYSIS_FAILED.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed analyze response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}
