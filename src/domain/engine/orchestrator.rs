//! Turn orchestrator.
//!
//! Sequences pattern matching, classification, confidence combination,
//! engagement policy, extraction, and the session store merge for each
//! inbound message, and returns a best-effort decision bundle.
//!
//! # Degradation policy
//!
//! `process_turn` is infallible to the caller. A failed-looking response
//! leaks information to an adversarial counterpart, so every internal
//! failure degrades silently: classifier errors fall to the safety-net
//! floor, reply errors fall to the canned list (inside the generator
//! wrapper), and store errors fall back to an ephemeral in-process record
//! for the current call.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::detection::{ConfidenceCombiner, DetectionSignal, PatternMatcher};
use crate::domain::engagement::{EngagementDecision, EngagementPolicy, ExitReason};
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::intelligence::{IntelligenceCategory, IntelligenceExtractor, IntelligenceSet};
use crate::domain::session::{FinalSummary, Session, TurnRecord};
use crate::ports::{
    ClassificationRequest, GeneratedReply, OutcomeReporter, ReplyGenerator, ReplyRequest,
    ScamClassifier, SessionStore,
};

use super::{InboundMessage, TurnMetadata};

/// Briefing for the engagement collaborator, returned with every turn so
/// the transport layer can steer the next exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDirectives {
    /// Mode decided for this turn.
    pub mode: crate::domain::engagement::EngagementMode,
    /// Turn count after this turn's merge.
    pub turn_number: u32,
    /// Categories the completeness rule still wants, in priority order.
    pub missing_categories: Vec<IntelligenceCategory>,
}

/// Decision bundle for one processed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Session the turn belongs to.
    pub session_id: SessionId,
    /// Combined detection signal for the turn.
    pub signal: DetectionSignal,
    /// Engagement decision for the turn.
    pub decision: EngagementDecision,
    /// Decoy reply, when the session is engaging.
    pub reply: Option<GeneratedReply>,
    /// Briefing for the engagement collaborator.
    pub directives: ReplyDirectives,
    /// Intelligence accumulated across the whole session so far.
    pub accumulated_intelligence: IntelligenceSet,
}

/// Result of processing one inbound message.
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    /// An ordinary turn was processed.
    Turn(TurnOutcome),
    /// The conversation is over; the frozen summary is returned.
    Ended(FinalSummary),
}

impl ProcessOutcome {
    /// The turn bundle, if this outcome is one.
    pub fn as_turn(&self) -> Option<&TurnOutcome> {
        match self {
            ProcessOutcome::Turn(turn) => Some(turn),
            ProcessOutcome::Ended(_) => None,
        }
    }

    /// The final summary, if the conversation ended.
    pub fn as_ended(&self) -> Option<&FinalSummary> {
        match self {
            ProcessOutcome::Turn(_) => None,
            ProcessOutcome::Ended(summary) => Some(summary),
        }
    }
}

/// Sequences the detection, policy, and extraction pipeline per turn.
pub struct TurnOrchestrator {
    pattern_matcher: PatternMatcher,
    extractor: IntelligenceExtractor,
    combiner: ConfidenceCombiner,
    policy: EngagementPolicy,
    classifier: Arc<dyn ScamClassifier>,
    replies: Arc<dyn ReplyGenerator>,
    store: Arc<dyn SessionStore>,
    reporter: Arc<dyn OutcomeReporter>,
}

impl TurnOrchestrator {
    /// Wires the pipeline to its collaborators.
    pub fn new(
        combiner: ConfidenceCombiner,
        policy: EngagementPolicy,
        classifier: Arc<dyn ScamClassifier>,
        replies: Arc<dyn ReplyGenerator>,
        store: Arc<dyn SessionStore>,
        reporter: Arc<dyn OutcomeReporter>,
    ) -> Self {
        Self {
            pattern_matcher: PatternMatcher::new(),
            extractor: IntelligenceExtractor::new(),
            combiner,
            policy,
            classifier,
            replies,
            store,
            reporter,
        }
    }

    /// Processes one inbound message and returns the decision bundle.
    ///
    /// The distinguished end-of-conversation control message short-circuits
    /// to the frozen final summary without touching the engagement
    /// collaborator.
    pub async fn process_turn(
        &self,
        session_id: SessionId,
        message: InboundMessage,
        history: Vec<InboundMessage>,
        metadata: TurnMetadata,
    ) -> ProcessOutcome {
        if message.is_end_signal() {
            let summary = self
                .finalize(&session_id, Some(ExitReason::EndSignal))
                .await;
            return ProcessOutcome::Ended(summary);
        }

        let session = match self.store.init_if_absent(&session_id).await {
            Ok(session) => session,
            Err(err) => {
                warn!(session = %session_id, error = %err, "session store unavailable, using ephemeral record");
                Session::new(session_id.clone())
            }
        };
        if session.is_terminal() {
            return ProcessOutcome::Ended(session.summary());
        }

        // 1-2. Deterministic pattern pass, then the classifier only if
        // the pattern pass is inconclusive.
        let pattern_signal = self.pattern_matcher.evaluate(&message.text);
        let verdict = if pattern_signal.is_none() {
            let request = ClassificationRequest::new(message.text.clone())
                .with_history(history.clone())
                .with_metadata(metadata);
            let request = if session.turn_count() > 0 {
                // Standing belief carried from the session.
                request.with_previous_signal(DetectionSignal::floor(
                    session.last_confidence(),
                    session.last_category(),
                ))
            } else {
                request
            };
            match self.classifier.classify(request).await {
                Ok(verdict) => Some(verdict),
                Err(err) => {
                    debug!(session = %session_id, error = %err, "classifier unavailable, applying floor");
                    None
                }
            }
        } else {
            None
        };

        // 3. Combine into the turn's signal; monotonicity applied here.
        let signal = self.combiner.combine(
            pattern_signal.as_ref(),
            verdict.as_ref(),
            session.last_confidence(),
            session.last_category(),
        );
        let hostile = verdict
            .as_ref()
            .map(|v| v.counterpart_hostile)
            .unwrap_or_else(|| session.counterpart_hostile());

        // 4. Engagement policy over pre-merge session state.
        let decision = self.policy.evaluate(&crate::domain::engagement::TurnContext {
            confidence: signal.confidence,
            previous_mode: session.last_mode(),
            turn_number: session.turn_count() + 1,
            session_age_secs: session.age_secs(&Timestamp::now()),
            intelligence: session.intelligence(),
            stale_turns: session.stale_turns(),
            counterpart_hostile: hostile,
        });

        // 5. Engagement reply, which may surface candidate entities.
        let reply = if decision.mode.is_engaging() && decision.should_continue {
            let request = ReplyRequest {
                message: message.text.clone(),
                history,
                accumulated: session.intelligence().clone(),
                missing_categories: self.policy.missing_categories(session.intelligence()),
                mode: decision.mode,
            };
            match self.replies.generate(request).await {
                Ok(reply) => Some(reply),
                Err(err) => {
                    warn!(session = %session_id, error = %err, "reply generation failed with no fallback");
                    None
                }
            }
        } else {
            None
        };
        let candidates = reply
            .as_ref()
            .map(|r| r.candidate_entities.clone())
            .unwrap_or_default();

        // 6. Extraction: deterministic pass plus validated candidates.
        let turn_intelligence = self.extractor.extract(&message.text, &candidates);

        // 7. Single atomic merge into the session.
        let record = TurnRecord {
            confidence: signal.confidence,
            mode: decision.mode,
            category: signal.category,
            counterpart_hostile: hostile,
            intelligence: turn_intelligence,
            observed_at: Timestamp::now(),
        };
        let updated = match self.store.apply_turn(&session_id, &record).await {
            Ok(session) => session,
            Err(err) => {
                warn!(session = %session_id, error = %err, "session store merge failed, keeping ephemeral state");
                let mut local = session;
                local.apply_turn(&record);
                local
            }
        };

        if !decision.should_continue {
            // Freeze for reporting; the bundle below still reflects this turn.
            debug!(session = %session_id, reason = ?decision.exit_reason, "exit condition honored");
            self.finalize(&session_id, decision.exit_reason).await;
        }

        let directives = ReplyDirectives {
            mode: decision.mode,
            turn_number: updated.turn_count(),
            missing_categories: self.policy.missing_categories(updated.intelligence()),
        };
        ProcessOutcome::Turn(TurnOutcome {
            session_id,
            signal,
            decision,
            reply,
            directives,
            accumulated_intelligence: updated.intelligence().clone(),
        })
    }

    /// Freezes the session and dispatches the outcome report.
    async fn finalize(&self, session_id: &SessionId, reason: Option<ExitReason>) -> FinalSummary {
        let summary = match self.store.freeze(session_id, reason).await {
            Ok(summary) => summary,
            Err(err) => {
                warn!(session = %session_id, error = %err, "freeze failed, reporting ephemeral summary");
                Session::new(session_id.clone()).freeze(reason)
            }
        };
        self.dispatch_report(summary.clone());
        summary
    }

    /// Fire-and-forget outcome delivery; failures are logged, never surfaced.
    fn dispatch_report(&self, summary: FinalSummary) {
        let reporter = Arc::clone(&self.reporter);
        tokio::spawn(async move {
            if let Err(err) = reporter.report(&summary).await {
                warn!(session = %summary.session_id, error = %err, "outcome report failed");
            }
        });
    }
}
