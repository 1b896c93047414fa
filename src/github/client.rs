use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::{Config, DEFAULT_API_URL};
use crate::error::{Error, Result};
use crate::github::cache::ResponseCache;
use crate::github::graphql::{
    ContributionCalendar, ContributionsData, GraphQLResponse, CONTRIBUTIONS_QUERY,
};
use crate::github::source::GitHubSource;
use crate::models::{GitHubUser, Repository};

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

pub struct GitHubClient {
    client: Client,
    cache: ResponseCache,
    base_url: String,
    graphql_url: String,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(Error::Config("GitHub token not configured".to_string()));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("commitcanvas/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            cache: ResponseCache::new(DEFAULT_CACHE_TTL),
            base_url: DEFAULT_API_URL.to_string(),
            graphql_url: format!("{}/graphql", DEFAULT_API_URL),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(&config.github_token)?
            .with_base_url(config.api_url.clone())
            .with_cache_ttl(Duration::from_secs(config.cache_ttl_secs)))
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        // GraphQL lives under the same host as REST
        let base_url = base_url.trim_end_matches('/').to_string();
        self.graphql_url = format!("{}/graphql", base_url);
        self.base_url = base_url;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = ResponseCache::new(ttl);
        self
    }

    pub async fn rest<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self
            .cache
            .get_or_fetch(path, move || async move {
                let url = format!("{}{}", self.base_url, path);
                tracing::debug!("GET {}", url);

                let response = self
                    .client
                    .get(&url)
                    .header(header::ACCEPT, "application/vnd.github.v3+json")
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Http {
                        status: status.as_u16(),
                    });
                }

                Ok(response.json::<Value>().await?)
            })
            .await?;

        Ok(serde_json::from_value(value)?)
    }

    pub async fn graphql<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        // Cache on the exact query and variables
        let key = format!("graphql:{}:{}", query, variables);

        let data = self
            .cache
            .get_or_fetch(&key, move || async move {
                tracing::debug!("POST {}", self.graphql_url);

                let response = self
                    .client
                    .post(&self.graphql_url)
                    .json(&serde_json::json!({
                        "query": query,
                        "variables": variables,
                    }))
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Http {
                        status: status.as_u16(),
                    });
                }

                // A 200 can still carry GraphQL errors; those are never cached
                let envelope: GraphQLResponse<Value> = response.json().await?;
                envelope.into_data()
            })
            .await?;

        Ok(serde_json::from_value(data)?)
    }
}

#[async_trait]
impl GitHubSource for GitHubClient {
    async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        tracing::info!("Fetching user: {}", username);
        self.rest(&format!("/users/{}", username)).await
    }

    async fn get_repos(&self, username: &str) -> Result<Vec<Repository>> {
        tracing::info!("Fetching repositories for: {}", username);
        self.rest(&format!("/users/{}/repos?sort=updated&per_page=100", username))
            .await
    }

    async fn get_repo_languages(&self, full_name: &str) -> Result<HashMap<String, u64>> {
        tracing::debug!("Fetching languages for: {}", full_name);
        self.rest(&format!("/repos/{}/languages", full_name)).await
    }

    async fn get_contribution_calendar(&self, username: &str) -> Result<ContributionCalendar> {
        tracing::info!("Fetching contribution calendar for: {}", username);
        let data: ContributionsData = self
            .graphql(CONTRIBUTIONS_QUERY, serde_json::json!({ "username": username }))
            .await?;

        // No user object with no errors means the login does not exist
        data.user
            .map(|user| user.contributions_collection.contribution_calendar)
            .ok_or_else(|| Error::UserNotFound(username.to_string()))
    }
}
