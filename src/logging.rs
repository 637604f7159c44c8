//! Log setup
//!
//! The TUI owns the terminal, so all log output goes to `household.log` in the
//! base directory.

use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::{HouseholdPaths, Settings};
use crate::error::{HouseholdError, HouseholdResult};

/// Environment variable holding an `EnvFilter` directive, e.g. `household=debug`
pub const LOG_ENV: &str = "HOUSEHOLD_LOG";

/// Filter from `HOUSEHOLD_LOG`, falling back to the configured level
pub fn filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Calling it twice is an error.
pub fn init(paths: &HouseholdPaths, settings: &Settings) -> HouseholdResult<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())?;

    let file_log = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(file_log.with_filter(filter(settings)))
        .try_init()
        .map_err(|e| HouseholdError::Config(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_falls_back() {
        let settings = Settings {
            log_level: "not a level!!".into(),
            ..Settings::default()
        };
        // Must not panic whatever the environment holds
        let _ = filter(&settings);
    }
}
