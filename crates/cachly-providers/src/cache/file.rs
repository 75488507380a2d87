//! File backend
//!
//! Stores each entry as `<dir>/<cache id>.cache`. Writes go to a temporary
//! file first and are renamed into place, so readers never see a partial
//! payload. `flush` removes only `.cache` files, leaving anything else in
//! the directory alone.

use crate::constants::{
    BACKEND_FILE, FILE_DEFAULT_DIR_NAME, FILE_ENTRY_EXTENSION, FILE_TEMP_EXTENSION,
    FILE_WRITE_PROBE,
};
use async_trait::async_trait;
use cachly_domain::error::{Error, Result};
use cachly_domain::{CacheBackend, CacheId};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// One-file-per-entry backend
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
    write_seq: AtomicU64,
}

impl FileBackend {
    /// Open (creating if needed) a store in `dir`
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendUnavailable`] when the directory cannot be
    /// created or written to.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            Error::backend_unavailable_with_source(
                BACKEND_FILE,
                format!("Cannot create cache directory {}", dir.display()),
                e,
            )
        })?;

        let probe = dir.join(FILE_WRITE_PROBE);
        std::fs::write(&probe, b"")
            .and_then(|()| std::fs::remove_file(&probe))
            .map_err(|e| {
                Error::backend_unavailable_with_source(
                    BACKEND_FILE,
                    format!("Cache directory {} is not writable", dir.display()),
                    e,
                )
            })?;

        debug!(dir = %dir.display(), "File cache opened");
        Ok(Self {
            dir,
            write_seq: AtomicU64::new(0),
        })
    }

    /// Store under the user cache directory (`~/.cache/cachly` on Linux)
    pub fn in_user_cache_dir() -> Result<Self> {
        let base = dirs::cache_dir().ok_or_else(|| {
            Error::backend_unavailable(BACKEND_FILE, "No user cache directory on this platform")
        })?;
        Self::new(base.join(FILE_DEFAULT_DIR_NAME))
    }

    /// The directory entries are stored in
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, id: &CacheId) -> PathBuf {
        self.dir.join(format!("{id}.{FILE_ENTRY_EXTENSION}"))
    }

    fn temp_path(&self, id: &CacheId) -> PathBuf {
        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(
            "{id}.{}.{seq}.{FILE_TEMP_EXTENSION}",
            std::process::id()
        ))
    }

    fn unavailable(action: &str, path: &Path, e: std::io::Error) -> Error {
        Error::backend_unavailable_with_source(
            BACKEND_FILE,
            format!("Failed to {action} {}", path.display()),
            e,
        )
    }

    /// Paths of every entry file, paired with its cache id
    async fn entry_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| Self::unavailable("list", &self.dir, e))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Self::unavailable("list", &self.dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some(FILE_ENTRY_EXTENSION) {
                continue;
            }
            if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                files.push((id.to_string(), path.clone()));
            }
        }
        Ok(files)
    }
}

#[async_trait]
impl CacheBackend for FileBackend {
    async fn set(&self, id: &CacheId, payload: &str, _expires_at: i64) -> Result<bool> {
        let path = self.entry_path(id);
        let temp = self.temp_path(id);
        tokio::fs::write(&temp, payload)
            .await
            .map_err(|e| Self::unavailable("write", &temp, e))?;
        if let Err(e) = tokio::fs::rename(&temp, &path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(Self::unavailable("write", &path, e));
        }
        Ok(true)
    }

    async fn exists(&self, id: &CacheId) -> Result<bool> {
        let path = self.entry_path(id);
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| Self::unavailable("stat", &path, e))
    }

    async fn get(&self, id: &CacheId) -> Result<Option<String>> {
        let path = self.entry_path(id);
        match tokio::fs::read_to_string(&path).await {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::unavailable("read", &path, e)),
        }
    }

    async fn delete(&self, id: &CacheId) -> Result<bool> {
        let path = self.entry_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Self::unavailable("delete", &path, e)),
        }
    }

    async fn list_all(&self) -> Result<HashMap<String, String>> {
        let mut all = HashMap::new();
        for (id, path) in self.entry_files().await? {
            match tokio::fs::read_to_string(&path).await {
                Ok(payload) => {
                    all.insert(id, payload);
                }
                // Deleted between listing and reading
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(Self::unavailable("read", &path, e)),
            }
        }
        Ok(all)
    }

    async fn flush(&self) -> Result<bool> {
        for (_, path) in self.entry_files().await? {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(Self::unavailable("delete", &path, e)),
            }
        }
        Ok(true)
    }

    fn backend_name(&self) -> &str {
        BACKEND_FILE
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

use cachly_application::ports::registry::{BackendConfig, CACHE_BACKENDS, CacheBackendEntry};

fn file_backend_factory(config: &BackendConfig) -> Result<std::sync::Arc<dyn CacheBackend>> {
    let backend = match &config.path {
        Some(path) => FileBackend::new(path.clone())?,
        None => FileBackend::in_user_cache_dir()?,
    };
    Ok(std::sync::Arc::new(backend))
}

#[linkme::distributed_slice(CACHE_BACKENDS)]
static FILE_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: BACKEND_FILE,
    description: "One file per entry in a local directory",
    factory: file_backend_factory,
};
