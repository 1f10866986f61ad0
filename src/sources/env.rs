//! Environment variable configuration sources.

use super::ConfigSource;
use crate::error::{NotifierError, Result};
use config::Environment;
use std::collections::HashMap;
use std::sync::Arc;

/// Prefixed environment variable source.
///
/// Loads configuration from environment variables with a specified prefix
/// and separator for nested keys.
///
/// # Examples
///
/// ```rust
/// use sheet_notifier::sources::EnvSource;
///
/// // SHEET_NOTIFIER_WATCH__COLUMN=4 -> watch.column = 4
/// let source = EnvSource::new("SHEET_NOTIFIER", "__");
/// ```
pub struct EnvSource {
    prefix: String,
    separator: String,
    vars: Option<HashMap<String, String>>,
    priority: i32,
}

impl EnvSource {
    /// Create a new environment variable source.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Prefix for environment variables (e.g., "SHEET_NOTIFIER")
    /// * `separator` - Separator for nested keys (e.g., "__" for SHEET_NOTIFIER_WATCH__MODE)
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
            vars: None,
            priority: 300,
        }
    }

    /// Read from the given variables instead of the process environment.
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = Some(vars);
        self
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl ConfigSource for EnvSource {
    fn load(&self) -> Result<HashMap<String, config::Value>> {
        let env_source = Environment::with_prefix(&self.prefix)
            .prefix_separator("_")
            .separator(&self.separator)
            .try_parsing(true)
            .source(self.vars.clone().map(|vars| vars.into_iter().collect()));

        let loaded = config::Config::builder()
            .add_source(env_source)
            .build()
            .map_err(|e| {
                NotifierError::Config(format!("Failed to load environment variables: {}", e))
            })?;

        loaded
            .try_deserialize::<HashMap<String, config::Value>>()
            .map_err(|e| {
                NotifierError::Config(format!("Failed to parse environment variables: {}", e))
            })
    }

    fn name(&self) -> String {
        format!("env:{}*", self.prefix)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Unprefixed variables understood by earlier deployments of the bot.
///
/// | Variable              | Key                      |
/// |-----------------------|--------------------------|
/// | `DISCORD_WEBHOOK_URL` | `webhook_url`            |
/// | `SHEET_TSV_URL`       | `sheet_url`              |
/// | `CHECK_INTERVAL`      | `check_interval_minutes` |
pub struct LegacyEnvSource {
    lookup: Lookup,
    priority: i32,
}

impl LegacyEnvSource {
    /// Read the legacy variables from the process environment.
    pub fn new() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok())
    }

    /// Read the legacy variables through `lookup`.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Arc::new(lookup),
            priority: 200,
        }
    }

    /// Set the priority for this source.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

impl Default for LegacyEnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for LegacyEnvSource {
    fn load(&self) -> Result<HashMap<String, config::Value>> {
        let mut map = HashMap::new();

        if let Some(url) = self.get("DISCORD_WEBHOOK_URL") {
            map.insert("webhook_url".to_string(), config::Value::from(url));
        }
        if let Some(url) = self.get("SHEET_TSV_URL") {
            map.insert("sheet_url".to_string(), config::Value::from(url));
        }
        if let Some(raw) = self.get("CHECK_INTERVAL") {
            let minutes: f64 = raw.parse().map_err(|_| {
                NotifierError::Config(format!("CHECK_INTERVAL is not a number: {raw:?}"))
            })?;
            map.insert(
                "check_interval_minutes".to_string(),
                config::Value::from(minutes),
            );
        }

        Ok(map)
    }

    fn name(&self) -> String {
        "env:legacy".to_string()
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
