//! Reply Generator Port - Interface for the engagement text collaborator.
//!
//! The collaborator produces the decoy's next reply and may also surface
//! candidate entities it spotted (obfuscated or spelled-out values the
//! deterministic pass would miss). Candidates are re-validated before use.

use async_trait::async_trait;

use crate::domain::engagement::EngagementMode;
use crate::domain::engine::InboundMessage;
use crate::domain::intelligence::{CandidateEntity, IntelligenceCategory, IntelligenceSet};

/// Port for engagement reply generation.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generates the next decoy reply for an engaged conversation.
    async fn generate(&self, request: ReplyRequest) -> Result<GeneratedReply, ReplyError>;
}

/// Request for an engagement reply.
#[derive(Debug, Clone)]
pub struct ReplyRequest {
    /// The counterpart's current message.
    pub message: String,
    /// Prior conversation, oldest first.
    pub history: Vec<InboundMessage>,
    /// Intelligence accumulated so far.
    pub accumulated: IntelligenceSet,
    /// Categories the completeness rule still wants, in priority order.
    pub missing_categories: Vec<IntelligenceCategory>,
    /// Current engagement mode.
    pub mode: EngagementMode,
}

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// The primary generative collaborator.
    Primary,
    /// The ordered canned fallback list.
    Fallback,
}

/// Reply produced for the decoy, plus any candidate entities the
/// collaborator spotted along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedReply {
    /// Text for the decoy to send.
    pub text: String,
    /// Unvalidated candidate entities.
    pub candidate_entities: Vec<CandidateEntity>,
    /// Which strategy produced the text.
    pub source: ReplySource,
}

impl GeneratedReply {
    /// Creates a primary-sourced reply.
    pub fn primary(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            candidate_entities: Vec::new(),
            source: ReplySource::Primary,
        }
    }

    /// Creates a fallback-sourced reply.
    pub fn fallback(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            candidate_entities: Vec::new(),
            source: ReplySource::Fallback,
        }
    }

    /// Attaches candidate entities.
    pub fn with_candidates(mut self, candidates: Vec<CandidateEntity>) -> Self {
        self.candidate_entities = candidates;
        self
    }
}

/// Engagement collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    /// Request exceeded the configured timeout.
    #[error("reply generation timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Collaborator is unavailable.
    #[error("reply generator unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the collaborator's response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ReplyError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
