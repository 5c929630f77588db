//! Outcome Reporter Port - fire-and-forget delivery of final summaries.
//!
//! Delivery failures are logged by the orchestrator and never propagate
//! to the caller.

use async_trait::async_trait;

use crate::domain::session::FinalSummary;

/// Errors that can occur while reporting an outcome.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The summary could not be delivered.
    #[error("outcome delivery failed: {0}")]
    Delivery(String),
}

/// Port for delivering final session summaries outbound.
#[async_trait]
pub trait OutcomeReporter: Send + Sync {
    /// Delivers a frozen session summary.
    async fn report(&self, summary: &FinalSummary) -> Result<(), ReportError>;
}
