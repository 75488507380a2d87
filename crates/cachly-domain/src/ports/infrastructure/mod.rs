//! Infrastructure service ports

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
