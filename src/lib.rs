pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod palette;
pub mod analysis;
pub mod storage;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::{GitHubClient, GitHubSource};
pub use analysis::{ContributionAggregator, LanguageAggregator, ProfilePipeline};
pub use storage::SettingsStore;
