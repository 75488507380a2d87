//! Application ports
//!
//! - **registry/** - compile-time registration of backend providers

pub mod registry;
