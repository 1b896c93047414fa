use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub api_url: String,
    pub cache_ttl_secs: u64,
    pub concurrency_limit: usize,
    pub allow_partial_languages: bool,
    pub settings_db: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_ACCESS_TOKEN")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("GitHub token not configured".to_string()))?;

        let api_url = env::var("GITHUB_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let cache_ttl_secs = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let concurrency_limit = env::var("CONCURRENCY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(100);

        let allow_partial_languages = env::var("ALLOW_PARTIAL_LANGUAGES")
            .ok()
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        let settings_db = env::var("SETTINGS_DB")
            .unwrap_or_else(|_| "commitcanvas.db".to_string());

        Ok(Self {
            github_token,
            api_url,
            cache_ttl_secs,
            concurrency_limit,
            allow_partial_languages,
            settings_db,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub concurrency_limit: usize,
    pub allow_partial_languages: bool,
    pub top_languages: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: 100,
            allow_partial_languages: false,
            top_languages: 10,
        }
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit,
            allow_partial_languages: config.allow_partial_languages,
            ..Self::default()
        }
    }
}
