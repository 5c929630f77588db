//! Engine module - turn orchestration.
//!
//! The orchestrator is the only component with control flow: it sequences
//! pattern matching, classification, combination, policy, extraction, and
//! the session store merge, and returns a best-effort decision bundle.

mod message;
mod orchestrator;

pub use message::{InboundMessage, Sender, TurnMetadata, END_OF_CONVERSATION};
pub use orchestrator::{ProcessOutcome, ReplyDirectives, TurnOrchestrator, TurnOutcome};
