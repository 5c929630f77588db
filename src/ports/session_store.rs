//! Session Store Port - Interface for per-conversation state.
//!
//! `apply_turn` is the single mutation entry point; it performs the
//! max/union merges internally so callers never hand-roll them. Backing
//! storage may be in-process or shared; because every mutation is a
//! commutative, idempotent merge, duplicate or out-of-order application
//! of a turn converges to the same state.

use async_trait::async_trait;

use crate::domain::engagement::ExitReason;
use crate::domain::foundation::SessionId;
use crate::domain::session::{FinalSummary, Session, TurnRecord};

/// Errors that can occur during session store operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    /// No session exists for the identifier.
    #[error("session not found: {0}")]
    NotFound(SessionId),

    /// Backing storage unreachable.
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// State could not be encoded or decoded.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Port for persisting and merging session state.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads a session if it exists.
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError>;

    /// Loads the session, creating a fresh one on first contact.
    async fn init_if_absent(&self, id: &SessionId) -> Result<Session, SessionStoreError>;

    /// Merges one turn into the session and returns the updated state.
    ///
    /// Tolerates an absent session (initializes first) so out-of-order
    /// delivery cannot fail a turn.
    async fn apply_turn(
        &self,
        id: &SessionId,
        record: &TurnRecord,
    ) -> Result<Session, SessionStoreError>;

    /// Freezes the session for reporting and returns its final summary.
    async fn freeze(
        &self,
        id: &SessionId,
        exit_reason: Option<ExitReason>,
    ) -> Result<FinalSummary, SessionStoreError>;
}
