//! Configuration loader
//!
//! Sources are merged in this order, later ones overriding earlier ones:
//! 1. [`AppConfig::default()`]
//! 2. A TOML file (explicit path, else the first default location found)
//! 3. Environment variables, e.g. `CACHLY_CACHE__DEFAULT_BACKEND=null`

use crate::config::{AppConfig, BackendSettings, CacheConfig, LoggingConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use cachly_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(config_path) => {
                let found = config_path.exists();
                if found {
                    figment = figment.merge(Toml::file(config_path));
                }
                log_config_loaded(config_path, found);
            }
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context(format!(
            "Failed to write config file {}",
            path.as_ref().display()
        ))?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing file among the default locations
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    validate_cache_config(&config.cache)
}

fn validate_cache_config(config: &CacheConfig) -> Result<()> {
    if config.default_namespace.is_empty() {
        return Err(Error::configuration("Default namespace cannot be empty"));
    }
    if config.backend(&config.default_backend).is_none() {
        return Err(Error::configuration(format!(
            "Default backend '{}' is not configured. Configured backends: {:?}",
            config.default_backend,
            config.backend_names()
        )));
    }

    for (name, settings) in &config.backends {
        if settings.provider.is_empty() {
            return Err(Error::configuration(format!(
                "Backend '{name}' has no provider"
            )));
        }
        if let Some(fallback) = &settings.fallback {
            if fallback == name {
                return Err(Error::configuration(format!(
                    "Backend '{name}' cannot be its own fallback"
                )));
            }
            if config.backend(fallback).is_none() {
                return Err(Error::configuration(format!(
                    "Fallback '{fallback}' of backend '{name}' is not configured"
                )));
            }
        }
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set the default backend
    pub fn with_default_backend(mut self, name: impl Into<String>) -> Self {
        self.config.cache.default_backend = name.into();
        self
    }

    /// Set the default namespace
    pub fn with_default_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.cache.default_namespace = namespace.into();
        self
    }

    /// Add or replace a named backend
    pub fn with_backend(mut self, name: impl Into<String>, settings: BackendSettings) -> Self {
        self.config.cache.backends.insert(name.into(), settings);
        self
    }

    /// Require keys to be registered before they are written
    pub fn with_strict_keys(mut self, strict: bool) -> Self {
        self.config.cache.strict_keys = strict;
        self
    }

    /// Buffer registry writes until `commit`
    pub fn with_deferred_registry_writes(mut self, deferred: bool) -> Self {
        self.config.cache.deferred_registry_writes = deferred;
        self
    }

    /// Build the configuration without validating it
    pub fn build(self) -> AppConfig {
        self.config
    }

    /// Build and validate the configuration
    pub fn build_validated(self) -> Result<AppConfig> {
        validate_app_config(&self.config)?;
        Ok(self.config)
    }
}
