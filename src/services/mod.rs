pub mod article_service;
pub mod cache_store;
pub mod fishing_service;
pub mod pager;

pub use article_service::{ArticleService, LoadedFeed};
pub use cache_store::CacheStore;
pub use fishing_service::FishingService;
pub use pager::Pager;
