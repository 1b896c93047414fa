use chrono::Utc;
use indicatif::ProgressBar;
use std::sync::Arc;

use crate::analysis::contributions::ContributionAggregator;
use crate::analysis::languages::LanguageAggregator;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::GitHubSource;
use crate::models::{ContributionSummary, LanguageStat, ProfileSnapshot};

pub struct ProfilePipeline {
    github: Arc<dyn GitHubSource>,
    contributions: ContributionAggregator,
    languages: LanguageAggregator,
}

impl ProfilePipeline {
    pub fn new(github: impl GitHubSource + 'static, config: PipelineConfig) -> Self {
        Self {
            github: Arc::new(github),
            contributions: ContributionAggregator::new(),
            languages: LanguageAggregator::new(&config),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.languages = self.languages.with_progress(progress);
        self
    }

    pub async fn load(&self, username: &str) -> Result<ProfileSnapshot> {
        tracing::info!("Loading profile for: {}", username);
        let source = self.github.as_ref();

        // The repo list is requested twice here; the client cache coalesces it
        let (user, repositories, contributions, languages) = tokio::try_join!(
            source.get_user(username),
            source.get_repos(username),
            self.contributions.collect(source, username),
            self.languages.aggregate(source, username),
        )?;

        tracing::info!(
            "Loaded {} repositories, {} contribution days, {} languages",
            repositories.len(),
            contributions.contribution_days.len(),
            languages.len()
        );

        Ok(ProfileSnapshot {
            user,
            repositories,
            contributions,
            languages,
            fetched_at: Utc::now(),
        })
    }

    pub async fn contributions(&self, username: &str) -> Result<ContributionSummary> {
        self.contributions.collect(self.github.as_ref(), username).await
    }

    pub async fn languages(&self, username: &str) -> Result<Vec<LanguageStat>> {
        self.languages.aggregate(self.github.as_ref(), username).await
    }
}
