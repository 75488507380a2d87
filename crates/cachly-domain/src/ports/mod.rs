//! Domain Port Interfaces
//!
//! Contracts implemented by outer layers:
//! - **providers/** - storage backends ([`CacheBackend`])
//! - **infrastructure/** - ambient services ([`Clock`])

/// Infrastructure service ports
pub mod infrastructure;
/// Storage provider ports
pub mod providers;

pub use infrastructure::{Clock, ManualClock, SystemClock};
pub use providers::CacheBackend;
