//! Cache wiring
//!
//! [`BackendFactory`] turns named backend settings into backends;
//! [`CacheInstances`] hands out one [`NamespaceCache`] per
//! (backend, namespace) pair.
//!
//! [`NamespaceCache`]: cachly_application::NamespaceCache

pub mod factory;
pub mod instances;

pub use factory::BackendFactory;
pub use instances::CacheInstances;
