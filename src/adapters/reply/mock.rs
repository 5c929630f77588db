//! Mock reply generator for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::intelligence::CandidateEntity;
use crate::ports::{GeneratedReply, ReplyError, ReplyGenerator, ReplyRequest};

enum MockOutcome {
    Reply(GeneratedReply),
    Error(ReplyError),
}

/// Mock reply generator.
///
/// Scripted outcomes are consumed in order; once exhausted (or when none
/// were configured) a generic primary reply is returned.
#[derive(Clone)]
pub struct MockReplyGenerator {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    calls: Arc<Mutex<Vec<ReplyRequest>>>,
}

impl MockReplyGenerator {
    /// Creates a mock with no scripted outcomes.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a plain primary reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Reply(GeneratedReply::primary(text)));
        self
    }

    /// Queues a primary reply carrying candidate entities.
    pub fn with_reply_and_candidates(
        self,
        text: impl Into<String>,
        candidates: Vec<CandidateEntity>,
    ) -> Self {
        self.outcomes.lock().unwrap().push_back(MockOutcome::Reply(
            GeneratedReply::primary(text).with_candidates(candidates),
        ));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ReplyError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Number of generate calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Requests received, in order.
    pub fn calls(&self) -> Vec<ReplyRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockReplyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyGenerator for MockReplyGenerator {
    async fn generate(&self, request: ReplyRequest) -> Result<GeneratedReply, ReplyError> {
        self.calls.lock().unwrap().push(request);
        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Reply(reply)) => Ok(reply),
            Some(MockOutcome::Error(error)) => Err(error),
            None => Ok(GeneratedReply::primary("okay, tell me more")),
        }
    }
}
