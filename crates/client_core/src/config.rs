use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::domain::SearchWeights;
use url::Url;

use crate::error::SearchError;

pub const DEFAULT_CONFIG_FILE: &str = "story_search.toml";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_ANALYZE_PATH: &str = "/api/analyze";

/// What the controller does with a submit that arrives while a search is
/// still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Ignore the submit; the in-flight search stays authoritative.
    #[default]
    Reject,
    /// Dispatch a new search; the older response is discarded on arrival.
    Supersede,
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "supersede" => Ok(Self::Supersede),
            other => Err(format!(
                "unknown overlap policy '{other}' (expected 'reject' or 'supersede')"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub server_url: String,
    pub analyze_path: String,
    pub weights: SearchWeights,
    pub overlap_policy: OverlapPolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
            analyze_path: DEFAULT_ANALYZE_PATH.into(),
            weights: SearchWeights::default(),
            overlap_policy: OverlapPolicy::default(),
        }
    }
}

impl ClientSettings {
    /// Absolute URL of the analyze endpoint. An absolute `analyze_path`
    /// replaces any path on `server_url`.
    pub fn analyze_url(&self) -> Result<Url, SearchError> {
        let base = Url::parse(self.server_url.trim())?;
        if base.cannot_be_a_base() {
            return Err(SearchError::InvalidEndpoint(format!(
                "'{}' cannot be used as a base URL",
                self.server_url
            )));
        }
        Ok(base.join(&self.analyze_path)?)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    server_url: Option<String>,
    analyze_path: Option<String>,
    vector_weight: Option<f64>,
    bm25_weight: Option<f64>,
    overlap_policy: Option<OverlapPolicy>,
}

/// Defaults, then `story_search.toml` (or `explicit_path`), then environment.
///
/// A missing default file is fine; a missing explicit file or any file that
/// fails to parse is an error.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file_settings(&mut settings, &raw)
            .with_context(|| format!("invalid config file {}", path.display()))?,
        Err(err) if explicit_path.is_some() => {
            bail!("failed to read config file {}: {err}", path.display())
        }
        Err(_) => {}
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn apply_file_settings(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.analyze_path {
        settings.analyze_path = v;
    }
    if let Some(v) = file_cfg.vector_weight {
        settings.weights.vector = v;
    }
    if let Some(v) = file_cfg.bm25_weight {
        settings.weights.bm25 = v;
    }
    if let Some(v) = file_cfg.overlap_policy {
        settings.overlap_policy = v;
    }
    Ok(())
}

/// Unparseable values are ignored and leave the previous layer in place.
pub fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("STORY_SEARCH_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = lookup("APP__ANALYZE_PATH") {
        settings.analyze_path = v;
    }
    if let Some(v) = lookup("APP__VECTOR_WEIGHT") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.weights.vector = parsed;
        }
    }
    if let Some(v) = lookup("APP__BM25_WEIGHT") {
        if let Ok(parsed) = v.parse::<f64>() {
            settings.weights.bm25 = parsed;
        }
    }
    if let Some(v) = lookup("APP__OVERLAP_POLICY") {
        match v.parse::<OverlapPolicy>() {
            Ok(policy) => settings.overlap_policy = policy,
            Err(err) => tracing::warn!("ignoring APP__OVERLAP_POLICY: {err}"),
        }
    }
}
