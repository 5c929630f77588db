//! Candidate entities supplied by the engagement collaborator.

use serde::{Deserialize, Serialize};

use super::IntelligenceCategory;

/// A value the collaborator believes it spotted in the conversation,
/// e.g. an obfuscated or spelled-out phone number.
///
/// Candidates are never trusted as-is: each is re-validated against the
/// same category predicate as the deterministic pass before it can enter
/// a session's accumulated set. Failing candidates are dropped silently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEntity {
    /// Claimed category. Unknown categories fail deserialization.
    pub category: IntelligenceCategory,
    /// Raw value as reported by the collaborator.
    pub value: String,
}

impl CandidateEntity {
    /// Creates a new candidate.
    pub fn new(category: IntelligenceCategory, value: impl Into<String>) -> Self {
        Self {
            category,
            value: value.into(),
        }
    }
}
