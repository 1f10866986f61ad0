//! Turning detected changes into chat text.

use crate::config::MessageConfig;
use crate::detect::{Change, VictorChange};
use std::collections::HashMap;

/// Difficulty tiers from easiest to hardest. Numeric difficulty `d` maps to
/// `TIERS[floor(d)]`, clamped to the ends.
const TIERS: [&str; 16] = [
    "effortless",
    "easy",
    "medium",
    "hard",
    "harder",
    "insane",
    "expert",
    "extreme",
    "madness",
    "master",
    "grandmaster",
    "gm1",
    "gm2",
    "tas",
    "tas1",
    "tas2",
];

/// Resolve a difficulty cell to a tier name.
///
/// Named tiers match case-insensitively. Numbers map by integer band
/// (`1.5` is `easy`, `3.0` is `hard`). Anything else is `None`.
///
/// The poll loop and `send-manual` share this banding. Centered bands
/// (`round(d)`, no `effortless` tier) were used previously and are
/// intentionally not kept, so both paths pick the same emoji for a level.
pub fn difficulty_tier(difficulty: &str) -> Option<&'static str> {
    let normalized = difficulty.trim().to_lowercase();

    if let Some(tier) = TIERS.iter().copied().find(|t| *t == normalized) {
        return Some(tier);
    }

    let value: f64 = normalized.parse().ok().filter(|v: &f64| v.is_finite())?;
    let band = value.floor().clamp(0.0, (TIERS.len() - 1) as f64) as usize;
    Some(TIERS[band])
}

/// Renders [`Change`]s with the configured template and emoji.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    template: String,
    emoji: HashMap<String, String>,
}

impl MessageFormatter {
    /// Create a formatter from message settings.
    pub fn new(config: &MessageConfig) -> Self {
        Self {
            template: config.template.clone(),
            emoji: config.emoji.clone(),
        }
    }

    /// Render one change.
    pub fn format(&self, change: &Change) -> String {
        match change {
            Change::Value {
                column,
                previous,
                current,
            } => self
                .template
                .replace("{column}", column)
                .replace("{previous}", previous)
                .replace("{value}", current),
            Change::Victor(victor) => self.format_victor(victor),
        }
    }

    /// `**victor** has beaten **level** by creators - Difficulty: d [emoji]`
    pub fn format_victor(&self, change: &VictorChange) -> String {
        let who = match &change.mention {
            Some(id) => format!("<@{}> ({})", id, change.victor),
            None => change.victor.clone(),
        };

        format!(
            "**{}** has beaten **{}** by {} - Difficulty: {} [{}]",
            who,
            change.level_name,
            change.creators,
            change.difficulty,
            self.difficulty_emoji(&change.difficulty)
        )
    }

    /// Emoji for a difficulty cell; the lowercased cell itself if it is not
    /// a recognizable difficulty.
    pub fn difficulty_emoji(&self, difficulty: &str) -> String {
        match difficulty_tier(difficulty) {
            Some(tier) => self
                .emoji
                .get(tier)
                .cloned()
                .unwrap_or_else(|| format!(":{tier}:")),
            None => difficulty.trim().to_lowercase(),
        }
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new(&MessageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_tier_named() {
        assert_eq!(difficulty_tier("Hard"), Some("hard"));
        assert_eq!(difficulty_tier(" GM2 "), Some("gm2"));
        assert_eq!(difficulty_tier("TAS"), Some("tas"));
    }

    #[test]
    fn test_difficulty_tier_numeric_bands() {
        assert_eq!(difficulty_tier("0.4"), Some("effortless"));
        assert_eq!(difficulty_tier("1"), Some("easy"));
        assert_eq!(difficulty_tier("1.99"), Some("easy"));
        // Floor banding: 1.6 stays easy rather than rounding up to medium.
        assert_eq!(difficulty_tier("1.6"), Some("easy"));
        assert_eq!(difficulty_tier("3.0"), Some("hard"));
        assert_eq!(difficulty_tier("10.5"), Some("grandmaster"));
        assert_eq!(difficulty_tier("14.2"), Some("tas1"));
        assert_eq!(difficulty_tier("15"), Some("tas2"));
        assert_eq!(difficulty_tier("99"), Some("tas2"));
        assert_eq!(difficulty_tier("-2"), Some("effortless"));
    }

    #[test]
    fn test_difficulty_tier_unknown() {
        assert_eq!(difficulty_tier("???"), None);
        assert_eq!(difficulty_tier(""), None);
        assert_eq!(difficulty_tier("NaN"), None);
        assert_eq!(difficulty_tier("inf"), None);
    }

    #[test]
    fn test_emoji_fallbacks() {
        let mut config = MessageConfig::default();
        config.emoji.remove("medium");
        let formatter = MessageFormatter::new(&config);

        assert_eq!(formatter.difficulty_emoji("easy"), "<:easy:1464320027963424912>");
        assert_eq!(formatter.difficulty_emoji("2.2"), ":medium:");
        assert_eq!(formatter.difficulty_emoji(" Unrated "), "unrated");
    }

    #[test]
    fn test_format_value_template() {
        let config = MessageConfig {
            template: "{column}: {previous} -> {value}".into(),
            ..MessageConfig::default()
        };
        let change = Change::Value {
            column: "status".into(),
            previous: "A".into(),
            current: "B".into(),
        };
        assert_eq!(MessageFormatter::new(&config).format(&change), "status: A -> B");
        assert_eq!(MessageFormatter::default().format(&change), "New value: B");
    }

    #[test]
    fn test_format_victor() {
        let mut change = VictorChange {
            level_id: "L1".into(),
            level_name: "First Climb".into(),
            creators: "Ada".into(),
            difficulty: "2.5".into(),
            victor: "bob".into(),
            mention: None,
        };
        let formatter = MessageFormatter::default();

        assert_eq!(
            formatter.format_victor(&change),
            "**bob** has beaten **First Climb** by Ada - Difficulty: 2.5 [<:medium:1464320095034802289>]"
        );

        change.mention = Some("111".into());
        assert!(formatter.format_victor(&change).starts_with("**<@111> (bob)** has beaten"));
    }
}
