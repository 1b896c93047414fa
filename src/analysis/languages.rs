use futures::future::{join_all, try_join_all};
use indicatif::ProgressBar;
use std::collections::HashMap;
use tokio::sync::Semaphore;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::GitHubSource;
use crate::models::{LanguageStat, Repository};
use crate::palette::language_color;

pub struct LanguageAggregator {
    concurrency_limit: usize,
    allow_partial: bool,
    top_n: usize,
    progress: Option<ProgressBar>,
}

impl LanguageAggregator {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            concurrency_limit: config.concurrency_limit.max(1),
            allow_partial: config.allow_partial_languages,
            top_n: config.top_languages,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub async fn aggregate<S>(&self, source: &S, username: &str) -> Result<Vec<LanguageStat>>
    where
        S: GitHubSource + ?Sized,
    {
        let repos = source.get_repos(username).await?;
        tracing::info!("Aggregating languages across {} repositories", repos.len());

        let per_repo = self.fetch_languages(source, &repos).await?;
        Ok(self.rank(per_repo))
    }

    async fn fetch_languages<S>(
        &self,
        source: &S,
        repos: &[Repository],
    ) -> Result<Vec<HashMap<String, u64>>>
    where
        S: GitHubSource + ?Sized,
    {
        let semaphore = Semaphore::new(self.concurrency_limit);
        if let Some(pb) = &self.progress {
            pb.set_length(repos.len() as u64);
        }

        let requests = repos.iter().map(|repo| {
            let semaphore = &semaphore;
            async move {
                // Never closed; a missing permit is unreachable
                let _permit = semaphore.acquire().await.ok();
                let languages = source.get_repo_languages(&repo.full_name).await;
                if let Some(pb) = &self.progress {
                    pb.inc(1);
                }
                languages
            }
        });

        // Default is all-or-nothing: the first failure aborts the whole fan-out
        let per_repo = if self.allow_partial {
            join_all(requests)
                .await
                .into_iter()
                .zip(repos)
                .filter_map(|(result, repo)| match result {
                    Ok(languages) => Some(languages),
                    Err(e) => {
                        tracing::warn!("Skipping languages for {}: {}", repo.full_name, e);
                        None
                    }
                })
                .collect()
        } else {
            try_join_all(requests).await?
        };

        if let Some(pb) = &self.progress {
            pb.finish_and_clear();
        }

        Ok(per_repo)
    }

    pub fn rank<I>(&self, per_repo: I) -> Vec<LanguageStat>
    where
        I: IntoIterator<Item = HashMap<String, u64>>,
    {
        // Grand total spans every language, not just the kept ones
        let mut totals: HashMap<String, u64> = HashMap::new();
        let mut total_bytes: u64 = 0;

        for languages in per_repo {
            for (language, bytes) in languages {
                *totals.entry(language).or_insert(0) += bytes;
                total_bytes += bytes;
            }
        }

        let mut stats: Vec<LanguageStat> = totals
            .into_iter()
            .map(|(name, size)| LanguageStat {
                percentage: percentage(size, total_bytes),
                color: language_color(&name).to_string(),
                name,
                size,
            })
            .collect();

        // Largest first, ties by name for stable output
        stats.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
        stats.truncate(self.top_n);
        stats
    }
}

pub fn percentage(size: u64, total: u64) -> f64 {
    // 0/0 is 0%, not NaN
    if total == 0 {
        return 0.0;
    }
    // Scale by 1000 and round for one decimal place
    (size as f64 / total as f64 * 1000.0).round() / 10.0
}
