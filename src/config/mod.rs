//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `SCAM_WARDEN`
//! prefix and nested keys use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use scam_warden::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod classifier;
mod detection;
mod engagement;
mod error;

pub use classifier::ClassifierConfig;
pub use detection::DetectionConfig;
pub use engagement::EngagementConfig;
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has working defaults, so an empty environment yields the
/// documented operating point.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Detection thresholds and safety-net floor
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Engagement limits and completeness rule
    #[serde(default)]
    pub engagement: EngagementConfig,

    /// Classification collaborator connection
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `SCAM_WARDEN__DETECTION__AGGRESSIVE_THRESHOLD=0.9`
    /// - `SCAM_WARDEN__ENGAGEMENT__HONOR_EXIT_CONDITIONS=false`
    /// - `SCAM_WARDEN__CLASSIFIER__ENDPOINT=https://classify.internal/v1`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SCAM_WARDEN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.detection.validate()?;
        self.engagement.validate()?;
        self.classifier.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("SCAM_WARDEN__DETECTION__AGGRESSIVE_THRESHOLD");
        env::remove_var("SCAM_WARDEN__ENGAGEMENT__CAUTIOUS_MAX_TURNS");
        env::remove_var("SCAM_WARDEN__CLASSIFIER__ENDPOINT");
        env::remove_var("SCAM_WARDEN__CLASSIFIER__API_KEY");
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().expect("load should succeed");

        assert_eq!(config.detection.aggressive_threshold, 0.85);
        assert_eq!(config.engagement.cautious_max_turns, 20);
        assert!(!config.classifier.has_endpoint());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_reads_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SCAM_WARDEN__DETECTION__AGGRESSIVE_THRESHOLD", "0.9");
        env::set_var("SCAM_WARDEN__ENGAGEMENT__CAUTIOUS_MAX_TURNS", "12");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("load should succeed");
        assert_eq!(config.detection.aggressive_threshold, 0.9);
        assert_eq!(config.engagement.cautious_max_turns, 12);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var(
            "SCAM_WARDEN__CLASSIFIER__ENDPOINT",
            "https://classify.internal/v1",
        );
        env::set_var("SCAM_WARDEN__CLASSIFIER__API_KEY", "sk-test");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("load should succeed");
        assert!(config.validate().is_ok());
    }
}
