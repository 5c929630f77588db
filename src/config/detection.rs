//! Detection tuning configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::Confidence;

/// Detection thresholds and the safety-net floor
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Confidence at which engagement begins
    #[serde(default = "default_cautious_threshold")]
    pub cautious_threshold: f64,

    /// Confidence at which engagement goes all-in
    #[serde(default = "default_aggressive_threshold")]
    pub aggressive_threshold: f64,

    /// Confidence applied when neither pattern nor classifier produced a
    /// signal; places the session into the lowest active mode
    #[serde(default = "default_floor_confidence")]
    pub floor_confidence: f64,
}

impl DetectionConfig {
    /// Floor as a domain value
    pub fn floor(&self) -> Confidence {
        Confidence::new(self.floor_confidence)
    }

    /// Validate detection configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("cautious_threshold", self.cautious_threshold),
            ("aggressive_threshold", self.aggressive_threshold),
            ("floor_confidence", self.floor_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::ConfidenceOutOfRange(name));
            }
        }
        if self.cautious_threshold >= self.aggressive_threshold {
            return Err(ValidationError::ThresholdsOutOfOrder);
        }
        if self.floor_confidence > self.cautious_threshold {
            return Err(ValidationError::FloorAboveCautious);
        }
        Ok(())
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            cautious_threshold: default_cautious_threshold(),
            aggressive_threshold: default_aggressive_threshold(),
            floor_confidence: default_floor_confidence(),
        }
    }
}

fn default_cautious_threshold() -> f64 {
    0.4
}

fn default_aggressive_threshold() -> f64 {
    0.85
}

fn default_floor_confidence() -> f64 {
    0.4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_defaults_are_valid() {
        let config = DetectionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.floor(), Confidence::new(0.4));
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let config = DetectionConfig {
            aggressive_threshold: 1.2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ConfidenceOutOfRange("aggressive_threshold"))
        ));
    }

    #[test]
    fn test_rejects_inverted_thresholds() {
        let config = DetectionConfig {
            cautious_threshold: 0.9,
            aggressive_threshold: 0.85,
            floor_confidence: 0.1,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ThresholdsOutOfOrder)
        ));
    }

    #[test]
    fn test_rejects_floor_above_cautious() {
        let config = DetectionConfig {
            floor_confidence: 0.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::FloorAboveCautious)
        ));
    }
}
