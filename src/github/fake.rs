//! In-memory `GitHubSource` for aggregator tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};
use crate::github::graphql::{
    CalendarDay, ContributionCalendar, ContributionWeek,
};
use crate::github::source::GitHubSource;
use crate::models::{GitHubUser, Repository};

#[derive(Default)]
pub struct FakeSource {
    pub repos: Vec<Repository>,
    pub languages: HashMap<String, HashMap<String, u64>>,
    pub failing_repos: HashSet<String>,
    pub calendar: Option<ContributionCalendar>,
    pub language_calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_repo(mut self, full_name: &str, languages: &[(&str, u64)]) -> Self {
        self.repos.push(repository(full_name));
        self.languages.insert(
            full_name.to_string(),
            languages.iter().map(|(l, b)| (l.to_string(), *b)).collect(),
        );
        self
    }

    pub fn with_failing_repo(mut self, full_name: &str) -> Self {
        self.repos.push(repository(full_name));
        self.failing_repos.insert(full_name.to_string());
        self
    }

    pub fn with_calendar(mut self, calendar: ContributionCalendar) -> Self {
        self.calendar = Some(calendar);
        self
    }
}

pub fn repository(full_name: &str) -> Repository {
    let name = full_name.rsplit('/').next().unwrap_or(full_name);
    serde_json::from_value(serde_json::json!({
        "id": full_name.len() as u64,
        "name": name,
        "full_name": full_name,
        "html_url": format!("https://github.com/{}", full_name),
        "description": null,
        "stargazers_count": 0,
        "forks_count": 0,
        "language": null,
        "created_at": "2023-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    }))
    .unwrap()
}

pub fn user(login: &str) -> GitHubUser {
    serde_json::from_value(serde_json::json!({
        "login": login,
        "name": null,
        "avatar_url": "https://example.com/avatar.png",
        "html_url": format!("https://github.com/{}", login),
        "bio": null,
        "public_repos": 0,
        "followers": 0,
        "following": 0
    }))
    .unwrap()
}

pub fn calendar(start: &str, counts: &[u32]) -> ContributionCalendar {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    // One week per seven consecutive counts
    let days: Vec<CalendarDay> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| CalendarDay {
            date: start + chrono::Duration::days(i as i64),
            contribution_count: count,
            color: None,
        })
        .collect();

    ContributionCalendar {
        total_contributions: counts.iter().sum(),
        weeks: days
            .chunks(7)
            .map(|chunk| ContributionWeek {
                contribution_days: chunk.to_vec(),
            })
            .collect(),
    }
}

#[async_trait]
impl GitHubSource for FakeSource {
    async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        Ok(user(username))
    }

    async fn get_repos(&self, _username: &str) -> Result<Vec<Repository>> {
        Ok(self.repos.clone())
    }

    async fn get_repo_languages(&self, full_name: &str) -> Result<HashMap<String, u64>> {
        self.language_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_repos.contains(full_name) {
            return Err(Error::Http { status: 500 });
        }
        Ok(self.languages.get(full_name).cloned().unwrap_or_default())
    }

    async fn get_contribution_calendar(&self, username: &str) -> Result<ContributionCalendar> {
        self.calendar
            .clone()
            .ok_or_else(|| Error::UserNotFound(username.to_string()))
    }
}
