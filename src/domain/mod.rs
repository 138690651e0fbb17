pub mod article;
pub mod fishing;

pub use article::{ArticleRecord, FeedDocument, StatisticalSummary};
pub use fishing::{FishingConfig, FishingCounters};
