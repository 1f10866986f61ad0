//! Configuration source trait.

use crate::error::Result;
use std::collections::HashMap;

/// A place configuration values come from.
///
/// Sources return a raw key-value map; the loader merges every source in
/// priority order before deserializing into [`crate::config::NotifierConfig`].
pub trait ConfigSource: Send + Sync {
    /// Load configuration as a raw key-value map.
    ///
    /// Nested tables are allowed; the loader flattens them to dotted keys
    /// so that a higher-priority source can override a single nested field.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be loaded or parsed.
    fn load(&self) -> Result<HashMap<String, config::Value>>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// Get the priority of this source (higher = takes precedence).
    ///
    /// Default priorities:
    /// - Prefixed environment variables: 300
    /// - Legacy environment variables: 200
    /// - Configuration file: 100
    fn priority(&self) -> i32 {
        100
    }
}
