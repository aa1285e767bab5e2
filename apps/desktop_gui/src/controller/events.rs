//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{Generation, ResultSet, SearchError};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    SearchSettled {
        generation: Generation,
        outcome: Result<ResultSet, SearchError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Server,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Search,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("connect")
            || lower.contains("timed out")
            || lower.contains("dns")
            || lower.contains("disconnected")
            || lower.contains("queue")
        {
            UiErrorCategory::Transport
        } else if lower.contains("invalid") || lower.contains("malformed") {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_search_error(err: &SearchError) -> Self {
        let category = match err {
            SearchError::Request { status, .. } if (400..500).contains(status) => {
                UiErrorCategory::Validation
            }
            SearchError::Request { .. } => UiErrorCategory::Server,
            SearchError::Transport(_) | SearchError::Cancelled => UiErrorCategory::Transport,
            SearchError::Decode(_) | SearchError::InvalidEndpoint(_) => UiErrorCategory::Unknown,
        };

        Self {
            category,
            context: UiErrorContext::Search,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line status bar text; the banner itself shows `message` verbatim.
    pub fn status_text(&self) -> String {
        if self.context == UiErrorContext::BackendStartup {
            return format!("Backend worker startup failure: {}", self.message);
        }
        match self.category {
            UiErrorCategory::Transport => {
                "Search server unreachable; check the server URL and retry.".to_string()
            }
            UiErrorCategory::Validation => "The search server rejected the query.".to_string(),
            UiErrorCategory::Server => {
                "The search server failed to analyze the query; retry shortly.".to_string()
            }
            UiErrorCategory::Unknown => "Search failed.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failures_split_on_status_class() {
        let rejected = UiError::from_search_error(&SearchError::Request {
            status: 400,
            message: "Invalid query".into(),
        });
        assert_eq!(rejected.category(), UiErrorCategory::Validation);
        assert_eq!(rejected.message(), "Invalid query");

        let crashed = UiError::from_search_error(&SearchError::Request {
            status: 503,
            message: "Analysis failed".into(),
        });
        assert_eq!(crashed.category(), UiErrorCategory::Server);
    }

    #[test]
    fn transport_failures_point_at_connectivity() {
        let err = UiError::from_search_error(&SearchError::Transport(
            "error sending request for url (http://127.0.0.1:3000/api/analyze)".into(),
        ));
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err.context(), UiErrorContext::Search);
        assert!(err.status_text().contains("unreachable"));
    }

    #[test]
    fn startup_failures_are_labelled_as_such() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "invalid analyze endpoint: relative URL without a base",
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert!(err
            .status_text()
            .starts_with("Backend worker startup failure: invalid analyze endpoint"));
    }
}
