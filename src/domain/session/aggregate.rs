//! Session aggregate entity.
//!
//! One session per ongoing conversation identifier. After creation the
//! aggregate is mutated exclusively through `apply_turn`, whose merges
//! (confidence max, mode max, intelligence union) are commutative and
//! idempotent, so duplicate or out-of-order turn application converges.

use serde::{Deserialize, Serialize};

use crate::domain::detection::ScamCategory;
use crate::domain::engagement::{EngagementMode, ExitReason};
use crate::domain::foundation::{Confidence, SessionId, StateMachine, Timestamp};
use crate::domain::intelligence::IntelligenceSet;

/// Session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Accepting turns.
    Active,
    /// Frozen for reporting; further turns are ignored.
    Terminal,
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (SessionStatus::Active, SessionStatus::Terminal)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SessionStatus::Active => vec![SessionStatus::Terminal],
            SessionStatus::Terminal => vec![],
        }
    }
}

/// Everything one processed turn contributes to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Combined confidence for the turn (already monotonic).
    pub confidence: Confidence,
    /// Mode decided for the turn (already merged against the last mode).
    pub mode: EngagementMode,
    /// Category from the turn's signal, if any.
    pub category: Option<ScamCategory>,
    /// Hostility as of the most recent classification.
    pub counterpart_hostile: bool,
    /// Intelligence extracted this turn.
    pub intelligence: IntelligenceSet,
    /// When the turn was processed.
    pub observed_at: Timestamp,
}

/// Session aggregate - durable state for one conversation.
///
/// # Invariants
///
/// - `last_confidence` never decreases across applied turns
/// - `last_mode` never de-escalates
/// - every accumulated category set only grows
/// - `turn_count` increases by exactly one per applied turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    status: SessionStatus,
    turn_count: u32,
    last_confidence: Confidence,
    last_mode: EngagementMode,
    last_category: Option<ScamCategory>,
    counterpart_hostile: bool,
    intelligence: IntelligenceSet,
    stale_turns: u32,
    exit_reason: Option<ExitReason>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Creates a fresh session for a conversation identifier.
    pub fn new(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            status: SessionStatus::Active,
            turn_count: 0,
            last_confidence: Confidence::ZERO,
            last_mode: EngagementMode::None,
            last_category: None,
            counterpart_hostile: false,
            intelligence: IntelligenceSet::new(),
            stale_turns: 0,
            exit_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        status: SessionStatus,
        turn_count: u32,
        last_confidence: Confidence,
        last_mode: EngagementMode,
        last_category: Option<ScamCategory>,
        counterpart_hostile: bool,
        intelligence: IntelligenceSet,
        stale_turns: u32,
        exit_reason: Option<ExitReason>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            status,
            turn_count,
            last_confidence,
            last_mode,
            last_category,
            counterpart_hostile,
            intelligence,
            stale_turns,
            exit_reason,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// True once the session is frozen.
    pub fn is_terminal(&self) -> bool {
        self.status == SessionStatus::Terminal
    }

    /// Number of processed turns.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Confidence after the most recent turn.
    pub fn last_confidence(&self) -> Confidence {
        self.last_confidence
    }

    /// Mode after the most recent turn.
    pub fn last_mode(&self) -> EngagementMode {
        self.last_mode
    }

    /// Most recent known category.
    pub fn last_category(&self) -> Option<ScamCategory> {
        self.last_category
    }

    /// Hostility flag from the most recent classification.
    pub fn counterpart_hostile(&self) -> bool {
        self.counterpart_hostile
    }

    /// Accumulated intelligence across all turns.
    pub fn intelligence(&self) -> &IntelligenceSet {
        &self.intelligence
    }

    /// Consecutive turns without new intelligence.
    pub fn stale_turns(&self) -> u32 {
        self.stale_turns
    }

    /// Exit reason recorded at freeze, if any.
    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit_reason
    }

    /// When the session was created.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Seconds the session has been running as of `now`.
    pub fn age_secs(&self, now: &Timestamp) -> u64 {
        now.secs_since(&self.created_at)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutation - merge operations only
    // ─────────────────────────────────────────────────────────────────────

    /// Applies one processed turn.
    ///
    /// The only mutation entry point while active. Confidence and mode
    /// take the max of stored and incoming values, intelligence takes the
    /// union; the caller never hand-rolls these merges. Turns applied to a
    /// terminal session are ignored.
    pub fn apply_turn(&mut self, record: &TurnRecord) {
        if self.is_terminal() {
            return;
        }
        self.turn_count += 1;
        self.last_confidence = self.last_confidence.max_merge(record.confidence);
        self.last_mode = self.last_mode.max_merge(record.mode);
        self.last_category = record.category.or(self.last_category);
        self.counterpart_hostile = record.counterpart_hostile;

        let added = self.intelligence.union(&record.intelligence);
        self.stale_turns = if added > 0 { 0 } else { self.stale_turns + 1 };

        if record.observed_at.is_after(&self.updated_at) {
            self.updated_at = record.observed_at;
        }
    }

    /// Freezes the session for reporting and returns the final summary.
    ///
    /// Idempotent: freezing an already-terminal session returns the same
    /// summary and keeps the originally recorded exit reason.
    pub fn freeze(&mut self, exit_reason: Option<ExitReason>) -> FinalSummary {
        if !self.is_terminal() {
            self.status = SessionStatus::Terminal;
            self.exit_reason = self.exit_reason.or(exit_reason);
        }
        self.summary()
    }

    /// Snapshot of the session for reporting.
    pub fn summary(&self) -> FinalSummary {
        FinalSummary {
            session_id: self.id.clone(),
            final_confidence: self.last_confidence,
            final_mode: self.last_mode,
            final_category: self.last_category,
            turn_count: self.turn_count,
            intelligence: self.intelligence.clone(),
            exit_reason: self.exit_reason,
            created_at: self.created_at,
            ended_at: self.updated_at,
        }
    }
}

/// Frozen session state returned to the caller and reported outbound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalSummary {
    pub session_id: SessionId,
    pub final_confidence: Confidence,
    pub final_mode: EngagementMode,
    pub final_category: Option<ScamCategory>,
    pub turn_count: u32,
    pub intelligence: IntelligenceSet,
    pub exit_reason: Option<ExitReason>,
    pub created_at: Timestamp,
    pub ended_at: Timestamp,
}
