use shared::protocol::StoryResult;

use crate::error::SearchError;

/// Ranked results in backend order.
pub type ResultSet = Vec<StoryResult>;

/// The one piece of UI state that decides what is on screen. Being an enum,
/// a loading indicator, an error banner and a result list can never coexist.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Loaded(ResultSet),
}

impl ViewState {
    pub fn settled(outcome: Result<ResultSet, SearchError>) -> Self {
        match outcome {
            Ok(results) => Self::Loaded(results),
            Err(err) => Self::Error(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn results(&self) -> Option<&[StoryResult]> {
        match self {
            Self::Loaded(results) => Some(results),
            _ => None,
        }
    }
}
