pub mod cache;
pub mod client;
pub mod graphql;
pub mod source;

pub use cache::ResponseCache;
pub use client::GitHubClient;
pub use graphql::ContributionCalendar;
pub use source::GitHubSource;

#[cfg(test)]
pub(crate) mod fake;
