//! Collections
//!
//! A collection is a child [`NamespaceCache`] whose namespace is
//! `<parent>-collection-<name>`. The parent tracks its children in a second
//! registry so they can be enumerated; children can have children of their
//! own, each level with independent registries.

use super::namespace::NamespaceCache;
use cachly_domain::constants::COLLECTION_NAMESPACE_INFIX;
use cachly_domain::error::{Error, Result};
use std::sync::Arc;
use tracing::debug;

impl NamespaceCache {
    /// The child cache called `name`, created on first use
    ///
    /// Repeated calls on the same handle return the same child.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] when `name` is empty.
    pub async fn collection(&self, name: &str) -> Result<Arc<NamespaceCache>> {
        if name.is_empty() {
            return Err(Error::invalid_key("Collection name cannot be empty"));
        }
        if let Some(child) = self.collections.get(name) {
            return Ok(Arc::clone(child.value()));
        }

        let child_namespace = self.collection_namespace(name);
        let handle = self.cache_id(&child_namespace)?;
        if self.collection_keys.register(&handle, name).await? {
            debug!(namespace = %self.namespace, collection = name, "Collection registered");
        }

        let child = Arc::new(NamespaceCache::with_options(
            child_namespace,
            Arc::clone(&self.backend),
            self.options.clone(),
        )?);
        Ok(Arc::clone(
            self.collections
                .entry(name.to_string())
                .or_insert(child)
                .value(),
        ))
    }

    /// Namespace a child called `name` would get
    pub fn collection_namespace(&self, name: &str) -> String {
        format!("{}{COLLECTION_NAMESPACE_INFIX}{name}", self.namespace)
    }

    /// Names of every registered collection, sorted
    pub async fn collection_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.collection_keys.list().await?.into_values().collect();
        names.sort();
        Ok(names)
    }

    /// Every registered collection by name
    pub async fn collections(&self) -> Result<Vec<(String, Arc<NamespaceCache>)>> {
        let mut all = Vec::new();
        for name in self.collection_names().await? {
            let child = self.collection(&name).await?;
            all.push((name, child));
        }
        Ok(all)
    }

    /// Call `f` with each registered collection and its name
    pub async fn each_collection<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&NamespaceCache, &str),
    {
        for (name, child) in self.collections().await? {
            f(&child, &name);
        }
        Ok(())
    }

    /// Forget the collection called `name`: flush it and drop it from the registry
    ///
    /// # Returns
    /// True if the collection was registered
    pub async fn delete_collection(&self, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Err(Error::invalid_key("Collection name cannot be empty"));
        }
        let handle = self.cache_id(&self.collection_namespace(name))?;
        if !self.collection_keys.contains(&handle).await? {
            self.collections.remove(name);
            return Ok(false);
        }
        let child = self.collection(name).await?;
        child.flush().await?;
        child.commit().await?;
        self.collections.remove(name);
        self.collection_keys.remove(&handle).await
    }
}
