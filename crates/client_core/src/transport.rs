//! Backend seam for the analyze round trip and its reqwest implementation.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ApiError,
    protocol::{AnalyzeRequest, AnalyzeResponse, StoryResult},
};
use tracing::{debug, warn};
use url::Url;

use crate::{config::ClientSettings, error::SearchError};

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// One request, one settlement. Implementations never retry.
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Vec<StoryResult>, SearchError>;
}

#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    http: Client,
    endpoint: Url,
}

impl HttpSearchBackend {
    pub fn new(settings: &ClientSettings) -> Result<Self, SearchError> {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(http: Client, settings: &ClientSettings) -> Result<Self, SearchError> {
        Ok(Self {
            http,
            endpoint: settings.analyze_url()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Vec<StoryResult>, SearchError> {
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            let message = ApiError::message_from_body(&body);
            warn!(
                status = status.as_u16(),
                endpoint = %self.endpoint,
                "analyze request failed"
            );
            return Err(SearchError::Request {
                status: status.as_u16(),
                message,
            });
        }

        let results = AnalyzeResponse::from_slice(&body)
            .map_err(|err| SearchError::Decode(err.to_string()))?
            .into_results();
        debug!(
            status = status.as_u16(),
            results = results.len(),
            "analyze request succeeded"
        );
        Ok(results)
    }
}
