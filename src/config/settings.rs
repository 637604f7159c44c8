//! User settings for the household client
//!
//! Manages the API endpoint, display preferences and log verbosity.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::HouseholdPaths;
use crate::error::HouseholdError;

/// Environment variable that overrides the configured API URL
pub const API_URL_ENV: &str = "HOUSEHOLD_API_URL";

/// Date format used when none is configured or the configured one is invalid
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the family expense API (no trailing slash)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default tracing filter when `HOUSEHOLD_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_url: default_api_url(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist.
    ///
    /// `HOUSEHOLD_API_URL` wins over whatever is stored.
    pub fn load_or_create(paths: &HouseholdPaths) -> Result<Self, HouseholdError> {
        let settings_path = paths.settings_file();

        let mut settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                HouseholdError::Io(format!("Failed to read settings file: {}", e))
            })?;

            serde_json::from_str::<Settings>(&contents).map_err(|e| {
                HouseholdError::Config(format!("Failed to parse settings file: {}", e))
            })?
        } else {
            Settings::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                settings.api_url = url;
            }
        }

        settings.api_url = normalize_api_url(&settings.api_url);

        if !is_valid_date_format(&settings.date_format) {
            warn!(
                date_format = %settings.date_format,
                "invalid date format in settings, using {}",
                DEFAULT_DATE_FORMAT
            );
            settings.date_format = default_date_format();
        }
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &HouseholdPaths) -> Result<(), HouseholdError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            HouseholdError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            HouseholdError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Replace the API URL after checking it looks like an http(s) URL
    pub fn set_api_url(&mut self, url: &str) -> Result<(), HouseholdError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(HouseholdError::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                url
            )));
        }
        self.api_url = normalize_api_url(url);
        Ok(())
    }
}

/// Whether chrono can render `format` without error
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn normalize_api_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, "http://localhost:5000/api");
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HouseholdPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "$".into();
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol":"€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.api_url, "http://localhost:5000/api");
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = HouseholdPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(
            paths.settings_file(),
            r#"{"date_format": "%Q", "currency_symbol": "$"}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_date_format_validation() {
        assert!(is_valid_date_format("%d/%m/%Y"));
        assert!(is_valid_date_format("%b %e"));
        assert!(!is_valid_date_format("%Q"));
    }

    #[test]
    fn test_set_api_url() {
        let mut settings = Settings::default();
        settings.set_api_url("https://example.test/api/").unwrap();
        assert_eq!(settings.api_url, "https://example.test/api");

        assert!(settings.set_api_url("ftp://example.test").is_err());
        assert_eq!(settings.api_url, "https://example.test/api");
    }
}
