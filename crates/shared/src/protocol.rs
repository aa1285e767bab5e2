use serde::{Deserialize, Serialize};

use crate::{
    domain::{SearchWeights, StoryId},
    error::ProtocolError,
};

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub story: String,
    pub vector_weight: f64,
    pub bm25_weight: f64,
}

impl AnalyzeRequest {
    pub fn new(story: impl Into<String>, weights: SearchWeights) -> Self {
        Self {
            story: story.into(),
            vector_weight: weights.vector,
            bm25_weight: weights.bm25,
        }
    }
}

/// One ranked story as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryResult {
    pub story_id: StoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub normalized_story: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hybrid_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub related_stories: Option<Vec<StoryResult>>,
}

impl AnalyzeResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Ranked results in backend order; a missing or null list is empty.
    pub fn into_results(self) -> Vec<StoryResult> {
        self.related_stories.unwrap_or_default()
    }
}
