//! Compute-once memoization
//!
//! A computation is identified by a list of key parts, packed into one user
//! key with [`pack_key_parts`]. The first call runs the producer and stores
//! its result; later calls with the same parts read it back.

use super::namespace::NamespaceCache;
use cachly_domain::error::Result;
use cachly_domain::Expires;
use cachly_domain::value_objects::pack_key_parts;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use tracing::debug;

impl NamespaceCache {
    /// Return the cached result for `parts`, running `producer` only on a miss
    ///
    /// ```ignore
    /// let report: Report = cache
    ///     .once(&[json!("report"), json!(year)], || async { build_report(year).await })
    ///     .await?;
    /// ```
    ///
    /// # Errors
    ///
    /// [`cachly_domain::Error::InvalidArgument`] when `parts` is empty, or
    /// whatever `producer` fails with (nothing is cached in that case).
    pub async fn once<T, F, Fut>(&self, parts: &[Value], producer: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.compute_once(parts, producer, false, Expires::Never).await
    }

    /// Like [`NamespaceCache::once`], but `force` recomputes and overwrites
    pub async fn once_force<T, F, Fut>(
        &self,
        parts: &[Value],
        producer: F,
        force: bool,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.compute_once(parts, producer, force, Expires::Never).await
    }

    /// Like [`NamespaceCache::once`], but a fresh result expires after `expires`
    ///
    /// Once the stored result has expired the next call recomputes it.
    pub async fn once_with_expiry<T, F, Fut>(
        &self,
        parts: &[Value],
        producer: F,
        expires: impl Into<Expires>,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.compute_once(parts, producer, false, expires.into()).await
    }

    async fn compute_once<T, F, Fut>(
        &self,
        parts: &[Value],
        producer: F,
        force: bool,
        expires: Expires,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let key = pack_key_parts(parts)?;
        let cid = self.cache_id(&key)?;

        if !force
            && self.keys.contains(&cid).await?
            && let Some(cached) = self.read_live::<T>(&cid, &key).await?
        {
            return Ok(cached);
        }

        let value = producer().await?;
        self.store(&cid, &key, &value, expires).await?;
        debug!(namespace = %self.namespace, key = %key, force, "Computed value cached");
        Ok(value)
    }
}
