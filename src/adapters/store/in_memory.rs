//! In-memory session store.
//!
//! Keyed map behind a tokio RwLock. Suitable for single-instance
//! deployments and tests; multi-instance deployments put a shared store
//! behind the same port. Either way, every mutation is a merge the
//! aggregate itself performs, so replays and races converge.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::engagement::ExitReason;
use crate::domain::foundation::SessionId;
use crate::domain::session::{FinalSummary, Session, TurnRecord};
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for conversation sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored sessions (useful for tests).
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn init_if_absent(&self, id: &SessionId) -> Result<Session, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(id.clone())
            .or_insert_with(|| Session::new(id.clone()));
        Ok(session.clone())
    }

    async fn apply_turn(
        &self,
        id: &SessionId,
        record: &TurnRecord,
    ) -> Result<Session, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(id.clone())
            .or_insert_with(|| Session::new(id.clone()));
        session.apply_turn(record);
        Ok(session.clone())
    }

    async fn freeze(
        &self,
        id: &SessionId,
        exit_reason: Option<ExitReason>,
    ) -> Result<FinalSummary, SessionStoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(id.clone())
            .or_insert_with(|| Session::new(id.clone()));
        Ok(session.freeze(exit_reason))
    }
}
