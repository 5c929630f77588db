//! Engagement mode - how hard the decoy leans into the conversation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Engagement intensity, totally ordered and monotonic per session:
/// a session never de-escalates.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EngagementMode {
    /// Not engaging; the conversation has not crossed the cautious threshold.
    #[default]
    None,
    /// Engaging with guarded, non-committal replies.
    Cautious,
    /// Fully engaged decoy persona working to extract intelligence.
    Aggressive,
}

impl EngagementMode {
    /// True when the decoy actively replies in this mode.
    pub fn is_engaging(&self) -> bool {
        *self >= EngagementMode::Cautious
    }

    /// Returns the greater of two modes; the only merge operation.
    pub fn max_merge(self, other: Self) -> Self {
        self.max(other)
    }
}

impl StateMachine for EngagementMode {
    fn can_transition_to(&self, target: &Self) -> bool {
        target >= self
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            EngagementMode::None => vec![EngagementMode::Cautious, EngagementMode::Aggressive],
            EngagementMode::Cautious => vec![EngagementMode::Aggressive],
            EngagementMode::Aggressive => vec![],
        }
    }
}

impl fmt::Display for EngagementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EngagementMode::None => "none",
            EngagementMode::Cautious => "cautious",
            EngagementMode::Aggressive => "aggressive",
        };
        write!(f, "{}", s)
    }
}
