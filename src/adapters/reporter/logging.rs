//! Logging outcome reporter.
//!
//! Emits the final summary as a structured log line. Stands in for (or
//! alongside) a real outbound delivery adapter; the orchestrator treats
//! delivery as fire-and-forget either way.

use async_trait::async_trait;
use tracing::info;

use crate::domain::session::FinalSummary;
use crate::ports::{OutcomeReporter, ReportError};

/// Reports final summaries to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingOutcomeReporter;

impl LoggingOutcomeReporter {
    /// Creates a logging reporter.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutcomeReporter for LoggingOutcomeReporter {
    async fn report(&self, summary: &FinalSummary) -> Result<(), ReportError> {
        info!(
            session = %summary.session_id,
            confidence = %summary.final_confidence,
            mode = %summary.final_mode,
            turns = summary.turn_count,
            items = summary.intelligence.len(),
            exit_reason = ?summary.exit_reason,
            "session outcome"
        );
        Ok(())
    }
}
