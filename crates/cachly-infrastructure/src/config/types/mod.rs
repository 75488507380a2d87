//! Configuration types module

pub mod app;
pub mod cache;
pub mod logging;

// Re-export main types
pub use app::AppConfig;
pub use cache::{BackendSettings, CacheConfig};
pub use logging::LoggingConfig;
