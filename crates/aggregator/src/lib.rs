pub mod cache;
pub mod metrics;
pub mod service;

pub use cache::UserCache;
pub use service::UserAggregator;
