//! Classification collaborator configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Classification collaborator connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Classification endpoint URL; unset disables the HTTP adapter
    pub endpoint: Option<String>,

    /// API key for the endpoint
    pub api_key: Option<String>,

    /// Model identifier sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl ClassifierConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an endpoint is configured
    pub fn has_endpoint(&self) -> bool {
        self.endpoint.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Validate classifier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidClassifierEndpoint);
            }
            if !self.api_key.as_ref().is_some_and(|k| !k.is_empty()) {
                return Err(ValidationError::MissingRequired("CLASSIFIER_API_KEY"));
            }
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_model() -> String {
    "scam-screen-v2".to_string()
}

fn default_timeout() -> u64 {
    8
}

fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_defaults() {
        let config = ClassifierConfig::default();
        assert!(!config.has_endpoint());
        // Default derive leaves timeout at zero; deserialization fills it.
        let json: ClassifierConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(json.timeout_secs, 8);
        assert_eq!(json.max_retries, 2);
        assert_eq!(json.model, "scam-screen-v2");
    }

    #[test]
    fn test_endpoint_requires_api_key() {
        let config = ClassifierConfig {
            endpoint: Some("https://classify.internal/v1".to_string()),
            timeout_secs: 8,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("CLASSIFIER_API_KEY"))
        ));
    }

    #[test]
    fn test_endpoint_must_be_http() {
        let config = ClassifierConfig {
            endpoint: Some("ftp://classify.internal".to_string()),
            api_key: Some("sk-test".to_string()),
            timeout_secs: 8,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidClassifierEndpoint)
        ));
    }

    #[test]
    fn test_valid_endpoint_config() {
        let config = ClassifierConfig {
            endpoint: Some("https://classify.internal/v1".to_string()),
            api_key: Some("sk-test".to_string()),
            timeout_secs: 8,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
