//! Builder for assembling configuration sources.

use super::{ConfigLoader, NotifierConfig, Validate};
use crate::error::{NotifierError, Result};
use crate::sources::{ConfigSource, EnvSource, FileSource, LegacyEnvSource};
use std::path::PathBuf;

/// Builder for loading a [`NotifierConfig`].
///
/// # Examples
///
/// ```rust,no_run
/// use sheet_notifier::config::NotifierConfig;
///
/// # fn example() -> sheet_notifier::error::Result<()> {
/// let config = NotifierConfig::builder()
///     .with_optional_file("sheet-notifier.toml")
///     .with_legacy_env()
///     .with_env_overrides("SHEET_NOTIFIER", "__")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigBuilder {
    files: Vec<(PathBuf, bool)>,
    env_prefix: Option<String>,
    env_separator: Option<String>,
    legacy_env: bool,
    custom_sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigBuilder {
    /// Create a new builder with no sources.
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            env_prefix: None,
            env_separator: None,
            legacy_env: false,
            custom_sources: Vec::new(),
        }
    }

    /// Add a required file source (YAML, TOML or JSON by extension).
    ///
    /// Later files override earlier ones.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push((path.into(), true));
        self
    }

    /// Add a file source that is skipped when the file does not exist.
    pub fn with_optional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push((path.into(), false));
        self
    }

    /// Add prefixed environment variables (priority 300).
    pub fn with_env_overrides(mut self, prefix: &str, separator: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self.env_separator = Some(separator.to_string());
        self
    }

    /// Honor `DISCORD_WEBHOOK_URL`, `SHEET_TSV_URL` and `CHECK_INTERVAL`
    /// (priority 200).
    pub fn with_legacy_env(mut self) -> Self {
        self.legacy_env = true;
        self
    }

    /// Add a custom configuration source.
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.custom_sources.push(Box::new(source));
        self
    }

    /// Load, merge and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A source fails to load
    /// - Deserialization fails (e.g. wrong type for a key)
    /// - Validation fails (missing URLs, placeholder webhook, bad interval)
    pub fn build(self) -> Result<NotifierConfig> {
        let mut loader = ConfigLoader::new();

        for (idx, (path, required)) in self.files.into_iter().enumerate() {
            let source = if required {
                FileSource::new(path)
            } else {
                FileSource::optional(path)
            };
            loader.add_source(Box::new(source.with_priority(100 + idx as i32)));
        }

        if self.legacy_env {
            loader.add_source(Box::new(LegacyEnvSource::new()));
        }

        if let (Some(prefix), Some(separator)) = (self.env_prefix, self.env_separator) {
            loader.add_source(Box::new(EnvSource::new(prefix, separator)));
        }

        for source in self.custom_sources {
            loader.add_source(source);
        }

        tracing::debug!(sources = ?loader.source_names(), "Loading configuration");

        let config: NotifierConfig = loader.load()?;
        config
            .validate()
            .map_err(|e| NotifierError::Validation(e.to_string()))?;

        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
