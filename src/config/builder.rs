//! Builder that layers settings from files, the environment and overrides.

use super::{Settings, Validate};
use crate::error::{HookError, Result};
use config::{Environment, File};
use std::path::PathBuf;

/// Default environment variable prefix, e.g. `FSHOOKS_PORT=9090`.
pub const DEFAULT_ENV_PREFIX: &str = "FSHOOKS";

/// Builder for loading [`Settings`].
///
/// Layers are merged in a fixed order, later ones winning:
/// files (in the order given), environment variables, explicit overrides.
/// Fields left unset by every layer take their defaults; `watch_root` has
/// none and must come from some layer.
///
/// # Examples
///
/// ```rust,no_run
/// use fswatch_hooks::config::SettingsBuilder;
///
/// # fn example() -> fswatch_hooks::error::Result<()> {
/// let settings = SettingsBuilder::new()
///     .with_file("fswatch-hooks.yaml")
///     .with_env_overrides("FSHOOKS", "__")
///     .with_port(9090)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct SettingsBuilder {
    file_paths: Vec<PathBuf>,
    env_prefix: Option<String>,
    env_separator: Option<String>,
    overrides: Vec<(String, config::Value)>,
}

impl SettingsBuilder {
    /// Create a new builder with no layers.
    pub fn new() -> Self {
        Self {
            file_paths: Vec::new(),
            env_prefix: None,
            env_separator: None,
            overrides: Vec::new(),
        }
    }

    /// Add a settings file. Format is picked from the extension:
    /// YAML (`.yaml`, `.yml`), TOML (`.toml`) or JSON (`.json`).
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_paths.push(path.into());
        self
    }

    /// Read environment variables starting with `<prefix>_`.
    ///
    /// `separator` splits nested keys; top-level keys keep their single
    /// underscores, so `FSHOOKS_WATCH_ROOT` sets `watch_root`.
    pub fn with_env_overrides(mut self, prefix: &str, separator: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self.env_separator = Some(separator.to_string());
        self
    }

    /// Set `key` to `value`, above every other layer.
    pub fn with_override(mut self, key: &str, value: impl Into<config::Value>) -> Self {
        self.overrides.push((key.to_string(), value.into()));
        self
    }

    /// Override the watch root.
    pub fn with_watch_root(self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.with_override("watch_root", path.to_string_lossy().into_owned())
    }

    /// Override the listen port.
    pub fn with_port(self, port: u16) -> Self {
        self.with_override("port", i64::from(port))
    }

    /// Load, merge and validate the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A settings file is missing or cannot be parsed
    /// - The merged settings cannot be deserialized (e.g. no `watch_root`)
    /// - Validation fails (e.g. the watch root does not exist)
    pub fn build(self) -> Result<Settings> {
        let settings = self.load()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and merge the settings without validating them.
    pub fn load(self) -> Result<Settings> {
        let mut builder = config::Config::builder();

        for path in &self.file_paths {
            builder = builder.add_source(File::from(path.clone()).required(true));
        }

        if let (Some(prefix), Some(separator)) = (&self.env_prefix, &self.env_separator) {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator(separator)
                    .try_parsing(true),
            );
        }

        for (key, value) in self.overrides {
            builder = builder.set_override(&key, value).map_err(|e| {
                HookError::ConfigError(format!("Failed to apply override '{}': {}", key, e))
            })?;
        }

        let merged = builder
            .build()
            .map_err(|e| HookError::ConfigError(format!("Failed to build settings: {}", e)))?;

        merged.try_deserialize::<Settings>().map_err(|e| {
            HookError::ConfigError(format!("Failed to deserialize settings: {}", e))
        })
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
