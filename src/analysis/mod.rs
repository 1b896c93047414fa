pub mod contributions;
pub mod languages;
pub mod pipeline;

pub use contributions::ContributionAggregator;
pub use languages::LanguageAggregator;
pub use pipeline::ProfilePipeline;
