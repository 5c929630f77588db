//! Confidence combination and the monotonic-escalation invariant.
//!
//! All precedence rules, the safety-net floor, and the max-merge against
//! the previous turn live here, in one place, rather than scattered
//! through call sites.

use super::{DetectionSignal, ScamCategory};
use crate::domain::foundation::Confidence;
use crate::ports::ClassifierVerdict;

/// Merges the pattern matcher's signal and the classification
/// collaborator's verdict into the single per-turn detection signal.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceCombiner {
    floor: Confidence,
}

impl ConfidenceCombiner {
    /// Creates a combiner with the configured safety-net floor.
    ///
    /// The floor is applied when the pattern pass is inconclusive and the
    /// classifier is unavailable: an inconclusive turn must not read as
    /// "definitely safe" and must not de-escalate a flagged session.
    pub fn new(floor: Confidence) -> Self {
        Self { floor }
    }

    /// Returns the configured floor.
    pub fn floor(&self) -> Confidence {
        self.floor
    }

    /// Combines the available signals for one turn.
    ///
    /// Precedence: pattern signal, then classifier verdict, then the
    /// floor. The final confidence is `max(raw, previous)`, the single
    /// central application of the monotonic invariant. On the floor path
    /// the category carries over unchanged from the previous turn.
    pub fn combine(
        &self,
        pattern: Option<&DetectionSignal>,
        classifier: Option<&ClassifierVerdict>,
        previous_confidence: Confidence,
        previous_category: Option<ScamCategory>,
    ) -> DetectionSignal {
        let raw = match (pattern, classifier) {
            (Some(signal), _) => signal.clone(),
            (None, Some(verdict)) => {
                DetectionSignal::classifier(verdict.is_scam, verdict.confidence, verdict.category)
            }
            (None, None) => DetectionSignal::floor(self.floor, previous_category),
        };

        DetectionSignal {
            confidence: raw.confidence.max_merge(previous_confidence),
            category: raw.category.or(previous_category),
            ..raw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::SignalSource;

    fn combiner() -> ConfidenceCombiner {
        ConfidenceCombiner::new(Confidence::new(0.4))
    }

    #[test]
    fn pattern_signal_takes_precedence() {
        let pattern = DetectionSignal::pattern(Confidence::new(0.95), ScamCategory::CredentialTheft);
        let verdict = ClassifierVerdict::scam(Confidence::new(0.5), None);

        let combined = combiner().combine(Some(&pattern), Some(&verdict), Confidence::ZERO, None);

        assert_eq!(combined.source, SignalSource::Pattern);
        assert_eq!(combined.confidence, Confidence::new(0.95));
        assert_eq!(combined.category, Some(ScamCategory::CredentialTheft));
    }

    #[test]
    fn classifier_used_when_pattern_inconclusive() {
        let verdict = ClassifierVerdict::safe(Confidence::new(0.2));

        let combined = combiner().combine(None, Some(&verdict), Confidence::ZERO, None);

        assert_eq!(combined.source, SignalSource::Classifier);
        assert_eq!(combined.confidence, Confidence::new(0.2));
        assert!(!combined.is_scam);
    }

    #[test]
    fn floor_applied_when_nothing_available() {
        let combined = combiner().combine(None, None, Confidence::ZERO, None);

        assert_eq!(combined.source, SignalSource::Floor);
        assert_eq!(combined.confidence, Confidence::new(0.4));
        assert!(!combined.is_scam);
    }

    #[test]
    fn floor_does_not_deescalate_flagged_session() {
        let combined = combiner().combine(
            None,
            None,
            Confidence::new(0.72),
            Some(ScamCategory::AccountThreat),
        );

        assert_eq!(combined.confidence, Confidence::new(0.72));
        assert_eq!(combined.category, Some(ScamCategory::AccountThreat));
    }

    #[test]
    fn confidence_is_monotonic_against_previous_turn() {
        let verdict = ClassifierVerdict::safe(Confidence::new(0.2));

        let combined =
            combiner().combine(None, Some(&verdict), Confidence::new(0.72), None);

        assert_eq!(combined.confidence, Confidence::new(0.72));
    }

    #[test]
    fn higher_new_confidence_escalates() {
        let verdict = ClassifierVerdict::scam(Confidence::new(0.72), Some(ScamCategory::AccountThreat));

        let combined = combiner().combine(None, Some(&verdict), Confidence::new(0.2), None);

        assert_eq!(combined.confidence, Confidence::new(0.72));
        assert_eq!(combined.category, Some(ScamCategory::AccountThreat));
    }

    #[test]
    fn category_carries_over_when_new_signal_has_none() {
        let verdict = ClassifierVerdict::safe(Confidence::new(0.1));

        let combined = combiner().combine(
            None,
            Some(&verdict),
            Confidence::new(0.9),
            Some(ScamCategory::PrizeScam),
        );

        assert_eq!(combined.category, Some(ScamCategory::PrizeScam));
    }
}
