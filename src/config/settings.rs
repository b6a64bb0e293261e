//! Bot settings loading from config.toml
//!
//! Presence rotation, session timing, and page sizing are tunable without a
//! rebuild. Every field has a default, so a missing config.toml yields a
//! working configuration.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
    /// Status lines rotated through the bot's Discord presence
    pub presence_statuses: Vec<String>,
    /// Seconds between presence changes
    pub presence_interval_secs: u64,
    /// Seconds of inactivity before a pager session expires
    pub session_timeout_secs: u64,
    /// Cards shown per page in card lists
    pub cards_per_page: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            presence_statuses: vec![
                "flipping flashcards".to_string(),
                "/card list".to_string(),
                "/help".to_string(),
            ],
            presence_interval_secs: 300,
            session_timeout_secs: 120,
            cards_per_page: 5,
        }
    }
}

impl Settings {
    /// Inactivity window as a [`Duration`].
    #[must_use]
    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }

    /// Delay between presence changes as a [`Duration`].
    #[must_use]
    pub fn presence_interval(&self) -> Duration {
        Duration::from_secs(self.presence_interval_secs)
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed. A
/// missing file is not an error; defaults apply.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Settings::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

    toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("Failed to parse config.toml: {e}")))
}

/// Loads settings from the default location (./config.toml).
pub fn load_default_settings() -> Result<Settings> {
    load_settings("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_settings() {
        let toml_str = r#"
            presence_statuses = ["studying", "reviewing decks"]
            presence_interval_secs = 60
            session_timeout_secs = 90
            cards_per_page = 2
        "#;

        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.presence_statuses.len(), 2);
        assert_eq!(settings.presence_interval(), Duration::from_secs(60));
        assert_eq!(settings.session_timeout(), Duration::from_secs(90));
        assert_eq!(settings.cards_per_page, 2);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = toml::from_str("session_timeout_secs = 45").unwrap();
        assert_eq!(settings.session_timeout(), Duration::from_secs(45));
        assert_eq!(settings.presence_interval_secs, 300);
        assert_eq!(settings.cards_per_page, 5);
        assert!(!settings.presence_statuses.is_empty());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = load_settings("does-not-exist.toml").unwrap();
        assert_eq!(settings.session_timeout(), Duration::from_secs(120));
    }
}
