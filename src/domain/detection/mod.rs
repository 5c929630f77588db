//! Detection module - per-turn scam signals.
//!
//! The pattern matcher produces the cheapest signal; the confidence
//! combiner merges it with the classification collaborator's verdict and
//! enforces the monotonic-escalation invariant in one place.

mod combiner;
mod pattern_matcher;
mod signal;

pub use combiner::ConfidenceCombiner;
pub use pattern_matcher::PatternMatcher;
pub use signal::{DetectionSignal, ScamCategory, SignalSource};
