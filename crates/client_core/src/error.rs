use thiserror::Error;

/// Why a single analyze round trip failed. The `Display` text is what the
/// error banner shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Non-2xx status; `message` is taken from the error body or defaulted.
    #[error("{message}")]
    Request { status: u16, message: String },
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Decode(String),
    #[error("invalid analyze endpoint: {0}")]
    InvalidEndpoint(String),
    /// The in-flight future was dropped before the backend answered.
    #[error("Search cancelled")]
    Cancelled,
}

impl SearchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Decode(value.to_string())
        } else {
            Self::Transport(value.to_string())
        }
    }
}

impl From<url::ParseError> for SearchError {
    fn from(value: url::ParseError) -> Self {
        Self::InvalidEndpoint(value.to_string())
    }
}
