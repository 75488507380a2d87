//! Storage provider ports

pub mod cache;

pub use cache::CacheBackend;
