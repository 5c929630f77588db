//! Engagement policy - thresholds, exit conditions, and the decision
//! produced for each turn.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::EngagementMode;
use crate::domain::foundation::Confidence;
use crate::domain::intelligence::{IntelligenceCategory, IntelligenceSet};

/// Why a conversation should (or would) stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitReason {
    /// Mode-specific turn budget exhausted.
    TurnLimit,
    /// Session has run past the configured wall-clock maximum.
    DurationLimit,
    /// The completeness rule over accumulated categories is satisfied.
    IntelligenceComplete,
    /// The most recent classification flagged the counterpart as hostile.
    CounterpartHostile,
    /// No new intelligence for too many consecutive turns.
    Stale,
    /// The caller delivered the end-of-conversation signal.
    EndSignal,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExitReason::TurnLimit => "turn_limit",
            ExitReason::DurationLimit => "duration_limit",
            ExitReason::IntelligenceComplete => "intelligence_complete",
            ExitReason::CounterpartHostile => "counterpart_hostile",
            ExitReason::Stale => "stale",
            ExitReason::EndSignal => "end_signal",
        };
        write!(f, "{}", s)
    }
}

/// Decision produced fresh for every processed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementDecision {
    /// Mode for this turn, already merged against the session's last mode.
    pub mode: EngagementMode,
    /// Whether the conversation proceeds.
    pub should_continue: bool,
    /// The exit condition that fired, if any. Reported even when exits are
    /// not honored, for observability.
    pub exit_reason: Option<ExitReason>,
}

/// Conjunctive rule over category presence.
///
/// Every group must have at least one populated category before the
/// accumulated intelligence counts as complete. An empty rule never
/// completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessRule {
    groups: Vec<Vec<IntelligenceCategory>>,
}

impl CompletenessRule {
    /// Creates a rule from conjunctive groups.
    pub fn new(groups: Vec<Vec<IntelligenceCategory>>) -> Self {
        Self { groups }
    }

    /// A rule that never completes (exit condition 3 disabled).
    pub fn disabled() -> Self {
        Self { groups: Vec::new() }
    }

    /// True when every group has at least one populated category.
    pub fn is_satisfied_by(&self, intelligence: &IntelligenceSet) -> bool {
        !self.groups.is_empty()
            && self
                .groups
                .iter()
                .all(|group| group.iter().any(|c| intelligence.is_populated(*c)))
    }

    /// Categories named by the rule that are not yet populated, in rule
    /// order. Used to brief the engagement collaborator on what to probe
    /// for next.
    pub fn missing_categories(&self, intelligence: &IntelligenceSet) -> Vec<IntelligenceCategory> {
        let mut missing = Vec::new();
        for group in &self.groups {
            if group.iter().any(|c| intelligence.is_populated(*c)) {
                continue;
            }
            for category in group {
                if !missing.contains(category) {
                    missing.push(*category);
                }
            }
        }
        missing
    }
}

impl Default for CompletenessRule {
    fn default() -> Self {
        Self::new(vec![
            vec![
                IntelligenceCategory::PaymentHandle,
                IntelligenceCategory::AccountNumber,
            ],
            vec![IntelligenceCategory::Phone],
            vec![IntelligenceCategory::IdentityName],
        ])
    }
}

/// Tunable policy parameters. Loaded from configuration; defaults match
/// the documented operating point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Confidence at which engagement begins.
    pub cautious_threshold: Confidence,
    /// Confidence at which engagement goes all-in.
    pub aggressive_threshold: Confidence,
    /// Turn budget while cautious.
    pub cautious_max_turns: u32,
    /// Turn budget while aggressive.
    pub aggressive_max_turns: u32,
    /// Wall-clock budget for the whole session, in seconds.
    pub max_session_secs: u64,
    /// Consecutive no-new-intelligence turns before the session is stale.
    pub stale_turn_limit: u32,
    /// Whether exit conditions actually stop the conversation, or are
    /// only reported while the session runs until the external end signal.
    pub honor_exit_conditions: bool,
    /// Conjunctive completeness rule for exit condition 3.
    pub completeness: CompletenessRule,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            cautious_threshold: Confidence::new(0.4),
            aggressive_threshold: Confidence::new(0.85),
            cautious_max_turns: 20,
            aggressive_max_turns: 60,
            max_session_secs: 86_400,
            stale_turn_limit: 8,
            honor_exit_conditions: true,
            completeness: CompletenessRule::default(),
        }
    }
}

/// Session facts the policy needs for one evaluation.
///
/// All counters reflect the session state *before* this turn's merge; the
/// current turn contributes only its combined confidence and hostility.
#[derive(Debug, Clone)]
pub struct TurnContext<'a> {
    /// Combined confidence for the current turn.
    pub confidence: Confidence,
    /// Mode the session held after the previous turn.
    pub previous_mode: EngagementMode,
    /// 1-based number of the turn being processed.
    pub turn_number: u32,
    /// Seconds since the session was created.
    pub session_age_secs: u64,
    /// Intelligence accumulated through the previous turn.
    pub intelligence: &'a IntelligenceSet,
    /// Consecutive turns without new intelligence, through the previous turn.
    pub stale_turns: u32,
    /// Whether the most recent classification flagged the counterpart.
    pub counterpart_hostile: bool,
}

/// Maps confidence to engagement mode and evaluates exit conditions in a
/// fixed order.
#[derive(Debug, Clone)]
pub struct EngagementPolicy {
    config: PolicyConfig,
}

impl EngagementPolicy {
    /// Creates a policy with the given configuration.
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Mode implied by a confidence value alone, before the monotonic merge.
    pub fn mode_for(&self, confidence: Confidence) -> EngagementMode {
        if confidence >= self.config.aggressive_threshold {
            EngagementMode::Aggressive
        } else if confidence >= self.config.cautious_threshold {
            EngagementMode::Cautious
        } else {
            EngagementMode::None
        }
    }

    /// Categories the completeness rule still wants.
    pub fn missing_categories(&self, intelligence: &IntelligenceSet) -> Vec<IntelligenceCategory> {
        self.config.completeness.missing_categories(intelligence)
    }

    /// Produces the turn's engagement decision.
    ///
    /// Exit conditions are checked in fixed order - turn budget, duration,
    /// completeness, hostility, staleness - and the first that fires wins.
    /// When `honor_exit_conditions` is off the reason is still reported but
    /// the conversation continues.
    pub fn evaluate(&self, ctx: &TurnContext<'_>) -> EngagementDecision {
        let mode = self.mode_for(ctx.confidence).max_merge(ctx.previous_mode);
        let exit_reason = self.first_exit(mode, ctx);

        EngagementDecision {
            mode,
            should_continue: !(self.config.honor_exit_conditions && exit_reason.is_some()),
            exit_reason,
        }
    }

    fn first_exit(&self, mode: EngagementMode, ctx: &TurnContext<'_>) -> Option<ExitReason> {
        let turn_limit = match mode {
            EngagementMode::None => None,
            EngagementMode::Cautious => Some(self.config.cautious_max_turns),
            EngagementMode::Aggressive => Some(self.config.aggressive_max_turns),
        };
        if let Some(limit) = turn_limit {
            if ctx.turn_number >= limit {
                return Some(ExitReason::TurnLimit);
            }
        }
        if ctx.session_age_secs >= self.config.max_session_secs {
            return Some(ExitReason::DurationLimit);
        }
        if self.config.completeness.is_satisfied_by(ctx.intelligence) {
            return Some(ExitReason::IntelligenceComplete);
        }
        if ctx.counterpart_hostile {
            return Some(ExitReason::CounterpartHostile);
        }
        if ctx.stale_turns >= self.config.stale_turn_limit {
            return Some(ExitReason::Stale);
        }
        None
    }
}

impl Default for EngagementPolicy {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}
