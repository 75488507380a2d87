//! Shared fixtures

use cachly_application::{CacheOptions, NamespaceCache};
use cachly_domain::ManualClock;
use cachly_providers::cache::MokaBackend;
use std::sync::Arc;

/// 2024-01-01 00:00:00 UTC
pub const START: i64 = 1_704_067_200;

pub struct Fixture {
    pub cache: NamespaceCache,
    pub clock: Arc<ManualClock>,
    pub backend: Arc<MokaBackend>,
}

pub fn options(clock: &Arc<ManualClock>) -> CacheOptions {
    CacheOptions::default()
        .with_backend_name("memory")
        .with_clock(clock.clone())
}

pub fn fixture(namespace: &str) -> Fixture {
    fixture_with(namespace, |options| options)
}

pub fn fixture_with(namespace: &str, tweak: impl FnOnce(CacheOptions) -> CacheOptions) -> Fixture {
    let clock = Arc::new(ManualClock::new(START));
    let backend = Arc::new(MokaBackend::new());
    let cache =
        NamespaceCache::with_options(namespace, backend.clone(), tweak(options(&clock))).unwrap();
    Fixture {
        cache,
        clock,
        backend,
    }
}
