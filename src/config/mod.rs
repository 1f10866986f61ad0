//! Startup configuration.
//!
//! Values are read once at startup and never reloaded. See [`NotifierConfig::load`]
//! for the default source order.

mod builder;
mod loader;
mod validation;

pub use builder::ConfigBuilder;
pub(crate) use loader::ConfigLoader;
pub use validation::Validate;

use crate::error::{Result, ValidationError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SHEET_NOTIFIER_CONFIG";

/// File picked up from the working directory when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "sheet-notifier.toml";

/// Prefix for environment overrides (`SHEET_NOTIFIER_WEBHOOK_URL`, ...).
pub const ENV_PREFIX: &str = "SHEET_NOTIFIER";

/// Marker left in the sample webhook URL; a config still containing it was never filled in.
const PLACEHOLDER_MARKER: &str = "YOUR_WEBHOOK";

/// Complete bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifierConfig {
    /// Webhook that receives `{"content": ...}` posts.
    #[serde(default)]
    pub webhook_url: String,

    /// Published TSV export of the sheet.
    #[serde(default)]
    pub sheet_url: String,

    /// Minutes between polls; fractions are allowed.
    #[serde(default = "default_interval_minutes")]
    pub check_interval_minutes: f64,

    /// Timeout applied to every HTTP request.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// What to watch in the sheet.
    #[serde(default)]
    pub watch: WatchConfig,

    /// How notifications are worded.
    #[serde(default)]
    pub message: MessageConfig,
}

impl NotifierConfig {
    /// Create a new builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Load with the default source order:
    ///
    /// 1. the file named by `SHEET_NOTIFIER_CONFIG` (required when set), or
    ///    `sheet-notifier.toml` in the working directory if present
    /// 2. `DISCORD_WEBHOOK_URL` / `SHEET_TSV_URL` / `CHECK_INTERVAL`
    /// 3. `SHEET_NOTIFIER_*` variables, `__` separating nested keys
    pub fn load() -> Result<Self> {
        let builder = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::builder().with_file(PathBuf::from(path)),
            None => Self::builder().with_optional_file(DEFAULT_CONFIG_FILE),
        };

        builder
            .with_legacy_env()
            .with_env_overrides(ENV_PREFIX, "__")
            .build()
    }

    /// Poll interval as a [`Duration`].
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs_f64(self.check_interval_minutes * 60.0)
    }

    /// HTTP request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Validate for NotifierConfig {
    fn validate(&self) -> std::result::Result<(), ValidationError> {
        let mut errors = Vec::new();

        validation::check_http_url("webhook_url", &self.webhook_url, &mut errors);
        if self.webhook_url.contains(PLACEHOLDER_MARKER) {
            errors.push(ValidationError::invalid_field(
                "webhook_url",
                "still contains the placeholder webhook id/token",
            ));
        }
        validation::check_http_url("sheet_url", &self.sheet_url, &mut errors);

        // from_secs_f64 panics on non-finite or overflowing values
        if !self.check_interval_minutes.is_finite()
            || self.check_interval_minutes <= 0.0
            || self.check_interval_minutes > 60.0 * 24.0 * 365.0
        {
            errors.push(ValidationError::invalid_field(
                "check_interval_minutes",
                format!(
                    "must be a positive number of minutes, got {}",
                    self.check_interval_minutes
                ),
            ));
        }

        if self.request_timeout_secs == 0 {
            errors.push(ValidationError::invalid_field(
                "request_timeout_secs",
                "must be greater than 0",
            ));
        }

        if self.message.template.trim().is_empty() {
            errors.push(ValidationError::invalid_field(
                "message.template",
                "must not be empty",
            ));
        }

        match ValidationError::from_list(errors) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

/// Which change detector drives notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchMode {
    /// One column of the last row; notify when its value changes.
    #[default]
    LastRow,
    /// Per-level victor lists; notify once per newly listed victor.
    Victors,
}

/// What part of the sheet is watched.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Detector to use.
    #[serde(default)]
    pub mode: WatchMode,

    /// Zero-based column read from the last row in `last_row` mode.
    #[serde(default = "default_watch_column")]
    pub column: usize,

    /// Leading rows that hold headers rather than data.
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,

    /// Column layout used in `victors` mode and by `send-manual`.
    #[serde(default)]
    pub columns: VictorColumns,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            mode: WatchMode::default(),
            column: default_watch_column(),
            header_rows: default_header_rows(),
            columns: VictorColumns::default(),
        }
    }
}

/// Zero-based column indices of the level list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VictorColumns {
    /// Level id; rows without one are skipped.
    pub level_id: usize,
    /// Level name.
    pub level_name: usize,
    /// Creator(s) of the level.
    pub creator: usize,
    /// Difficulty, named tier or number.
    pub difficulty: usize,
    /// Comma-separated victor names.
    pub victors: usize,
    /// Player name as written in the victors column.
    pub tracker_username: usize,
    /// Chat user id for `tracker_username`, used for mentions.
    pub discord_id: usize,
}

impl Default for VictorColumns {
    fn default() -> Self {
        Self {
            level_id: 0,
            level_name: 1,
            creator: 2,
            difficulty: 3,
            victors: 10,
            tracker_username: 22,
            discord_id: 24,
        }
    }
}

/// Message wording.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageConfig {
    /// Template for `last_row` changes. Placeholders: `{value}`,
    /// `{previous}`, `{column}`.
    #[serde(default = "default_template")]
    pub template: String,

    /// Difficulty tier name to chat emoji code.
    #[serde(default = "default_emoji")]
    pub emoji: HashMap<String, String>,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            emoji: default_emoji(),
        }
    }
}

fn default_interval_minutes() -> f64 {
    10.0
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_watch_column() -> usize {
    10
}

fn default_header_rows() -> usize {
    1
}

fn default_template() -> String {
    "New value: {value}".to_string()
}

fn default_emoji() -> HashMap<String, String> {
    [
        ("effortless", "<:effortless:1470940267782869188>"),
        ("easy", "<:easy:1464320027963424912>"),
        ("medium", "<:medium:1464320095034802289>"),
        ("hard", "<:hard:1464320167571095766>"),
        ("harder", "<:harder:1464320225075007632>"),
        ("insane", "<:insane:1464320293622386812>"),
        ("expert", "<:expert:1464320350237102337>"),
        ("extreme", "<:extreme:1464320430658551838>"),
        ("madness", "<:madness:1464320499600462119>"),
        ("master", "<:master:1464320549600755937>"),
        ("grandmaster", "<:grandmaster:1464320611038924874>"),
        ("gm1", "<:gm1:1464320687953940543>"),
        ("gm2", "<:gm2:1464320747613978748>"),
        ("tas", "<:tas:1464320806162268222>"),
        ("tas1", "<:tas1:1464320856275550414>"),
        ("tas2", "<:tas2:1464320904061518007>"),
    ]
    .into_iter()
    .map(|(tier, code)| (tier.to_string(), code.to_string()))
    .collect()
}
