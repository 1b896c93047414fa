use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;
use crate::github::graphql::ContributionCalendar;
use crate::models::{GitHubUser, Repository};

/// Upstream data the aggregators are built on.
#[async_trait]
pub trait GitHubSource: Send + Sync {
    async fn get_user(&self, username: &str) -> Result<GitHubUser>;
    async fn get_repos(&self, username: &str) -> Result<Vec<Repository>>;
    async fn get_repo_languages(&self, full_name: &str) -> Result<HashMap<String, u64>>;
    /// Fails with `Error::UserNotFound` when the login resolves to no user.
    async fn get_contribution_calendar(&self, username: &str) -> Result<ContributionCalendar>;
}
