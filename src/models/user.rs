use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contribution::ContributionSummary;
use super::language::LanguageStat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub html_url: String,
    pub bio: Option<String>,
    pub public_repos: u32,
    pub followers: u32,
    pub following: u32,
    pub company: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub visibility: Option<String>,
}

/// Everything the profile view renders for one login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub user: GitHubUser,
    pub repositories: Vec<Repository>,
    pub contributions: ContributionSummary,
    pub languages: Vec<LanguageStat>,
    pub fetched_at: DateTime<Utc>,
}

impl ProfileSnapshot {
    pub fn top_repositories(&self, limit: usize) -> Vec<&Repository> {
        // Upstream order is by last update; re-sort by stars
        let mut repos: Vec<&Repository> = self.repositories.iter().collect();
        repos.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
        repos.truncate(limit);
        repos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, stars: u32) -> serde_json::Value {
        serde_json::json!({
            "id": stars as u64 + 1,
            "name": name,
            "full_name": format!("octo/{}", name),
            "html_url": format!("https://github.com/octo/{}", name),
            "description": null,
            "stargazers_count": stars,
            "forks_count": 0,
            "language": "Rust",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-06-01T00:00:00Z"
        })
    }

    #[test]
    fn test_repository_defaults_missing_topics() {
        let parsed: Repository = serde_json::from_value(repo("canvas", 3)).unwrap();
        assert!(parsed.topics.is_empty());
        assert!(parsed.visibility.is_none());
        assert_eq!(parsed.full_name, "octo/canvas");
    }

    #[test]
    fn test_top_repositories_sorted_by_stars() {
        let repositories: Vec<Repository> = [("a", 1), ("b", 30), ("c", 7)]
            .iter()
            .map(|(n, s)| serde_json::from_value(repo(n, *s)).unwrap())
            .collect();

        let snapshot = ProfileSnapshot {
            user: serde_json::from_value(serde_json::json!({
                "login": "octo",
                "name": null,
                "avatar_url": "https://example.com/a.png",
                "html_url": "https://github.com/octo",
                "bio": null,
                "public_repos": 3,
                "followers": 0,
                "following": 0,
                "company": null,
                "location": null,
                "blog": null,
                "twitter_username": null,
                "email": null
            }))
            .unwrap(),
            repositories,
            contributions: ContributionSummary::default(),
            languages: Vec::new(),
            fetched_at: Utc::now(),
        };

        let names: Vec<_> = snapshot
            .top_repositories(2)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "c"]);
    }
}
