//! Engagement policy configuration

use serde::Deserialize;

use super::detection::DetectionConfig;
use super::error::ValidationError;
use crate::domain::engagement::{CompletenessRule, PolicyConfig};
use crate::domain::foundation::Confidence;
use crate::domain::intelligence::IntelligenceCategory;

/// Engagement limits, staleness, and the completeness rule
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementConfig {
    /// Turn budget while cautious
    #[serde(default = "default_cautious_max_turns")]
    pub cautious_max_turns: u32,

    /// Turn budget while aggressive
    #[serde(default = "default_aggressive_max_turns")]
    pub aggressive_max_turns: u32,

    /// Wall-clock budget for a session, in seconds
    #[serde(default = "default_max_session_secs")]
    pub max_session_secs: u64,

    /// Consecutive no-new-intelligence turns before the session is stale
    #[serde(default = "default_stale_turn_limit")]
    pub stale_turn_limit: u32,

    /// Whether exit conditions stop the conversation, or are only
    /// reported while the session runs until the external end signal
    #[serde(default = "default_honor_exit_conditions")]
    pub honor_exit_conditions: bool,

    /// Conjunctive completeness groups; each group needs one populated
    /// category before intelligence counts as complete
    #[serde(default = "default_completeness_groups")]
    pub completeness_groups: Vec<Vec<IntelligenceCategory>>,
}

impl EngagementConfig {
    /// Builds the domain policy configuration
    pub fn policy_config(&self, detection: &DetectionConfig) -> PolicyConfig {
        PolicyConfig {
            cautious_threshold: Confidence::new(detection.cautious_threshold),
            aggressive_threshold: Confidence::new(detection.aggressive_threshold),
            cautious_max_turns: self.cautious_max_turns,
            aggressive_max_turns: self.aggressive_max_turns,
            max_session_secs: self.max_session_secs,
            stale_turn_limit: self.stale_turn_limit,
            honor_exit_conditions: self.honor_exit_conditions,
            completeness: CompletenessRule::new(self.completeness_groups.clone()),
        }
    }

    /// Validate engagement configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cautious_max_turns == 0 || self.aggressive_max_turns == 0 {
            return Err(ValidationError::InvalidTurnLimit);
        }
        if self.max_session_secs == 0 {
            return Err(ValidationError::InvalidDurationLimit);
        }
        if self.stale_turn_limit == 0 {
            return Err(ValidationError::InvalidStaleLimit);
        }
        Ok(())
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            cautious_max_turns: default_cautious_max_turns(),
            aggressive_max_turns: default_aggressive_max_turns(),
            max_session_secs: default_max_session_secs(),
            stale_turn_limit: default_stale_turn_limit(),
            honor_exit_conditions: default_honor_exit_conditions(),
            completeness_groups: default_completeness_groups(),
        }
    }
}

fn default_cautious_max_turns() -> u32 {
    20
}

fn default_aggressive_max_turns() -> u32 {
    60
}

fn default_max_session_secs() -> u64 {
    86_400
}

fn default_stale_turn_limit() -> u32 {
    8
}

fn default_honor_exit_conditions() -> bool {
    true
}

fn default_completeness_groups() -> Vec<Vec<IntelligenceCategory>> {
    vec![
        vec![
            IntelligenceCategory::PaymentHandle,
            IntelligenceCategory::AccountNumber,
        ],
        vec![IntelligenceCategory::Phone],
        vec![IntelligenceCategory::IdentityName],
    ]
}
