//! Configuration loader that merges multiple sources.

use crate::error::{NotifierError, Result};
use crate::sources::ConfigSource;
use config::ValueKind;
use serde::de::DeserializeOwned;

/// Loads and merges configuration from multiple sources.
///
/// Sources are merged lowest priority first. Nested tables are flattened to
/// dotted keys before merging, so an environment variable overriding
/// `watch.column` leaves `watch.mode` from the file intact.
pub struct ConfigLoader {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) {
        self.sources.push(source);
    }

    /// Load and merge configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No sources were added
    /// - Any source fails to load
    /// - Deserialization fails
    pub fn load<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        if self.sources.is_empty() {
            return Err(NotifierError::Config(
                "No configuration sources specified".to_string(),
            ));
        }

        let mut builder = config::Config::builder();

        for source in self.sorted() {
            let values = source.load().map_err(|e| {
                NotifierError::Config(format!("Failed to load source '{}': {}", source.name(), e))
            })?;
            tracing::debug!(source = %source.name(), keys = values.len(), "Loaded configuration source");

            let mut flat = Vec::new();
            for (key, value) in values {
                flatten_into(key, value, &mut flat);
            }

            for (key, value) in flat {
                builder = builder.set_override(&key, value).map_err(|e| {
                    NotifierError::Config(format!(
                        "Failed to merge key '{}' from '{}': {}",
                        key,
                        source.name(),
                        e
                    ))
                })?;
            }
        }

        let merged = builder
            .build()
            .map_err(|e| NotifierError::Config(format!("Failed to build configuration: {}", e)))?;

        merged
            .try_deserialize::<T>()
            .map_err(|e| NotifierError::Config(format!("Failed to deserialize configuration: {}", e)))
    }

    /// Get the list of source names in priority order.
    pub fn source_names(&self) -> Vec<String> {
        self.sorted().iter().map(|s| s.name()).collect()
    }

    fn sorted(&self) -> Vec<&dyn ConfigSource> {
        let mut sorted: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| s.as_ref()).collect();
        sorted.sort_by_key(|s| s.priority());
        sorted
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn flatten_into(prefix: String, value: config::Value, out: &mut Vec<(String, config::Value)>) {
    match value.kind {
        ValueKind::Table(table) if !table.is_empty() => {
            for (key, nested) in table {
                flatten_into(format!("{prefix}.{key}"), nested, out);
            }
        }
        kind => out.push((prefix, config::Value::new(None, kind))),
    }
}
