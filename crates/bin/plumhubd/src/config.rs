//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `plumhub.toml` in the working directory, or at the path in
//! `PLUMHUB_CONFIG`. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use plumhub_adapter_virtual::VirtualConfig;
use plumhub_domain::level::Level;

const DEFAULT_PATH: &str = "plumhub.toml";

/// Upper bound for every period and delay given in seconds (one week).
const MAX_PERIOD_SECS: u64 = 7 * 24 * 60 * 60;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Virtual house settings.
    pub house: VirtualConfig,
    /// Which load the rules drive, and how.
    pub rules: RulesConfig,
    /// Startup and upkeep behaviour.
    pub startup: StartupConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Rule parameters.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Display name of the load to automate.
    pub load: String,
    /// Level motion turns the load on to.
    pub on_level: u8,
    /// Seconds without motion before the load is turned off.
    pub off_after_secs: u64,
}

/// Startup and upkeep configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Delay between lookups while waiting for the load to be discovered.
    pub poll_interval_ms: u64,
    /// Seconds between refreshes of the house state once running.
    pub refresh_interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PLUMHUB_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PLUMHUB_LOAD") {
            self.rules.load = val;
        }
        if let Ok(val) = std::env::var("PLUMHUB_ON_LEVEL") {
            if let Ok(level) = val.parse() {
                self.rules.on_level = level;
            }
        }
        if let Ok(val) = std::env::var("PLUMHUB_OFF_AFTER_SECS") {
            if let Ok(secs) = val.parse() {
                self.rules.off_after_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("PLUMHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.load.trim().is_empty() {
            return Err(ConfigError::Validation(
                "rules.load must name a load".to_string(),
            ));
        }
        check_period("rules.off_after_secs", self.rules.off_after_secs)?;
        check_period(
            "startup.refresh_interval_secs",
            self.startup.refresh_interval_secs,
        )?;
        if self.startup.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "startup.poll_interval_ms must be non-zero".to_string(),
            ));
        }
        if self.house.motion_interval_secs > MAX_PERIOD_SECS {
            return Err(ConfigError::Validation(format!(
                "house.motion_interval_secs must be at most {MAX_PERIOD_SECS}"
            )));
        }
        Ok(())
    }
}

fn check_period(key: &str, secs: u64) -> Result<(), ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Validation(format!("{key} must be non-zero")));
    }
    if secs > MAX_PERIOD_SECS {
        return Err(ConfigError::Validation(format!(
            "{key} must be at most {MAX_PERIOD_SECS}"
        )));
    }
    Ok(())
}

impl RulesConfig {
    #[must_use]
    pub fn on_level(&self) -> Level {
        Level::new(self.on_level)
    }

    #[must_use]
    pub fn off_after(&self) -> Duration {
        Duration::from_secs(self.off_after_secs)
    }
}

impl StartupConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            load: "Nook".to_string(),
            on_level: 255,
            off_after_secs: 20,
        }
    }
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            refresh_interval_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "plumhubd=info,plumhub_app=info,plumhub_adapter_virtual=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.rules.load, "Nook");
        assert_eq!(config.rules.on_level(), Level::FULL);
        assert_eq!(config.rules.off_after(), Duration::from_secs(20));
        assert_eq!(config.startup.poll_interval(), Duration::from_millis(100));
        assert_eq!(config.startup.refresh_interval(), Duration::from_secs(30));
        assert_eq!(config.house.loads, vec!["Nook".to_string()]);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.rules.off_after_secs, 20);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [house]
            loads = ['Kitchen', 'Hall']
            discovery_delay_ms = 250
            motion_interval_secs = 30

            [rules]
            load = 'Kitchen'
            on_level = 180
            off_after_secs = 300

            [startup]
            poll_interval_ms = 50
            refresh_interval_secs = 60

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.house.loads.len(), 2);
        assert_eq!(config.house.discovery_delay_ms, 250);
        assert_eq!(config.house.motion_interval_secs, 30);
        assert_eq!(config.rules.load, "Kitchen");
        assert_eq!(config.rules.on_level(), Level::new(180));
        assert_eq!(config.rules.off_after(), Duration::from_secs(300));
        assert_eq!(config.startup.poll_interval_ms, 50);
        assert_eq!(config.startup.refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [rules]
            off_after_secs = 45
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.rules.off_after_secs, 45);
        assert_eq!(config.rules.load, "Nook");
        assert_eq!(config.rules.on_level, 255);
    }

    #[test]
    fn should_reject_on_level_above_255() {
        let result: Result<Config, _> = toml::from_str("[rules]\non_level = 256");
        assert!(result.is_err());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.rules.load, "Nook");
    }

    #[test]
    fn should_accept_default_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_reject_blank_load_name() {
        let mut config = Config::default();
        config.rules.load = " ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_zero_off_after() {
        let mut config = Config::default();
        config.rules.off_after_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_off_after_too_large_for_a_timer() {
        let mut config = Config::default();
        config.rules.off_after_secs = u64::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.rules.off_after_secs = MAX_PERIOD_SECS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_zero_refresh_interval() {
        let mut config = Config::default();
        config.startup.refresh_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_motion_interval_above_bound() {
        let mut config = Config::default();
        config.house.motion_interval_secs = MAX_PERIOD_SECS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_poll_interval() {
        let mut config = Config::default();
        config.startup.poll_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
