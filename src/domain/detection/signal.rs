//! Detection signal produced for each processed turn.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Confidence;

/// Fraud category recognized by the detection pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScamCategory {
    /// Requests for OTPs, PINs, passwords, or card secrets.
    CredentialTheft,
    /// Threats of account suspension or blocking, usually with urgency.
    AccountThreat,
    /// Lottery, prize, and reward claims.
    PrizeScam,
    /// Links designed to harvest credentials or payments.
    PhishingLink,
    /// Impersonation of banks, police, tax, or courier authorities.
    AuthorityImpersonation,
}

impl fmt::Display for ScamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScamCategory::CredentialTheft => "credential_theft",
            ScamCategory::AccountThreat => "account_threat",
            ScamCategory::PrizeScam => "prize_scam",
            ScamCategory::PhishingLink => "phishing_link",
            ScamCategory::AuthorityImpersonation => "authority_impersonation",
        };
        write!(f, "{}", s)
    }
}

/// Which stage of the pipeline produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    /// Deterministic pattern matcher.
    Pattern,
    /// Semantic classification collaborator.
    Classifier,
    /// Safety-net floor applied when neither produced a verdict.
    Floor,
}

/// Per-turn detection result consumed by the engagement policy.
///
/// Ephemeral: derived fresh each turn, never stored as-is. Only the
/// confidence and category survive into the session via merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionSignal {
    /// Stage that produced this signal.
    pub source: SignalSource,
    /// Whether this turn carried a positive scam verdict.
    pub is_scam: bool,
    /// Belief that the conversation is fraudulent, after the monotonic merge.
    pub confidence: Confidence,
    /// Recognized category, if any.
    pub category: Option<ScamCategory>,
}

impl DetectionSignal {
    /// Creates a pattern-sourced signal. Pattern matches are always positive
    /// verdicts; absence of a match never produces a signal at all.
    pub fn pattern(confidence: Confidence, category: ScamCategory) -> Self {
        Self {
            source: SignalSource::Pattern,
            is_scam: true,
            confidence,
            category: Some(category),
        }
    }

    /// Creates a classifier-sourced signal.
    pub fn classifier(is_scam: bool, confidence: Confidence, category: Option<ScamCategory>) -> Self {
        Self {
            source: SignalSource::Classifier,
            is_scam,
            confidence,
            category,
        }
    }

    /// Creates a floor signal: not a verdict, a non-regression bound.
    pub fn floor(confidence: Confidence, category: Option<ScamCategory>) -> Self {
        Self {
            source: SignalSource::Floor,
            is_scam: false,
            confidence,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_signal_is_always_positive() {
        let signal = DetectionSignal::pattern(Confidence::new(0.92), ScamCategory::CredentialTheft);
        assert!(signal.is_scam);
        assert_eq!(signal.source, SignalSource::Pattern);
        assert_eq!(signal.category, Some(ScamCategory::CredentialTheft));
    }

    #[test]
    fn floor_signal_is_not_a_verdict() {
        let signal = DetectionSignal::floor(Confidence::new(0.4), None);
        assert!(!signal.is_scam);
        assert_eq!(signal.source, SignalSource::Floor);
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&ScamCategory::CredentialTheft).unwrap();
        assert_eq!(json, "\"credential_theft\"");

        let json = serde_json::to_string(&ScamCategory::AuthorityImpersonation).unwrap();
        assert_eq!(json, "\"authority_impersonation\"");
    }

    #[test]
    fn category_displays_snake_case() {
        assert_eq!(format!("{}", ScamCategory::PrizeScam), "prize_scam");
    }

    #[test]
    fn signal_roundtrips_through_json() {
        let signal = DetectionSignal::classifier(
            true,
            Confidence::new(0.72),
            Some(ScamCategory::AccountThreat),
        );
        let json = serde_json::to_string(&signal).unwrap();
        let back: DetectionSignal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, signal);
    }
}
