//! File-based configuration source.

use super::ConfigSource;
use crate::error::{NotifierError, Result};
use config::File;
use std::collections::HashMap;
use std::path::PathBuf;

/// File-based configuration source.
///
/// Loads configuration from YAML, TOML, or JSON files with automatic format detection
/// based on file extension.
///
/// # Examples
///
/// ```rust,no_run
/// use sheet_notifier::sources::FileSource;
///
/// let source = FileSource::new("sheet-notifier.toml");
/// ```
pub struct FileSource {
    path: PathBuf,
    required: bool,
    priority: i32,
}

impl FileSource {
    /// Create a required file source. Loading fails if the file is missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
            priority: 100,
        }
    }

    /// Create a file source that yields no values when the file is missing.
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            required: false,
            ..Self::new(path)
        }
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn validate_extension(&self) -> Result<()> {
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                NotifierError::Config(format!(
                    "Unable to determine file format for: {}",
                    self.path.display()
                ))
            })?;

        match extension {
            "yaml" | "yml" | "toml" | "json" => Ok(()),
            _ => Err(NotifierError::Config(format!(
                "Unsupported file extension: {}. Supported: .yaml, .yml, .toml, .json",
                extension
            ))),
        }
    }
}

impl ConfigSource for FileSource {
    fn load(&self) -> Result<HashMap<String, config::Value>> {
        self.validate_extension()?;

        if !self.path.exists() {
            if self.required {
                return Err(NotifierError::Config(format!(
                    "Configuration file not found: {}",
                    self.path.display()
                )));
            }
            tracing::debug!(path = %self.path.display(), "Optional configuration file absent");
            return Ok(HashMap::new());
        }

        // config-rs picks the format from the extension
        let loaded = config::Config::builder()
            .add_source(File::from(self.path.clone()).required(true))
            .build()
            .map_err(|e| NotifierError::Config(format!("Failed to load file: {}", e)))?;

        loaded
            .try_deserialize::<HashMap<String, config::Value>>()
            .map_err(|e| NotifierError::Config(format!("Failed to parse file: {}", e)))
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
