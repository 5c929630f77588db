//! Scam Classifier Port - Interface for the semantic classification
//! collaborator.
//!
//! Invoked only when the deterministic pattern pass is inconclusive. Any
//! error - timeout included - is an expected outcome: the orchestrator
//! degrades to the safety-net floor rather than surfacing it.

use async_trait::async_trait;

use crate::domain::detection::{DetectionSignal, ScamCategory};
use crate::domain::engine::{InboundMessage, TurnMetadata};
use crate::domain::foundation::Confidence;

/// Port for semantic scam classification.
#[async_trait]
pub trait ScamClassifier: Send + Sync {
    /// Classifies the current message in its conversation context.
    async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<ClassifierVerdict, ClassifierError>;
}

/// Request for semantic classification.
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    /// Current message text.
    pub text: String,
    /// Prior conversation, oldest first.
    pub history: Vec<InboundMessage>,
    /// Caller-supplied turn metadata.
    pub metadata: TurnMetadata,
    /// Signal from the previous turn, if the session has one.
    pub previous_signal: Option<DetectionSignal>,
}

impl ClassificationRequest {
    /// Creates a request for a bare message.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            history: Vec::new(),
            metadata: TurnMetadata::default(),
            previous_signal: None,
        }
    }

    /// Attaches conversation history.
    pub fn with_history(mut self, history: Vec<InboundMessage>) -> Self {
        self.history = history;
        self
    }

    /// Attaches turn metadata.
    pub fn with_metadata(mut self, metadata: TurnMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attaches the previous turn's signal.
    pub fn with_previous_signal(mut self, signal: DetectionSignal) -> Self {
        self.previous_signal = Some(signal);
        self
    }
}

/// Verdict returned by the classification collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierVerdict {
    /// Whether the collaborator calls this a scam.
    pub is_scam: bool,
    /// Belief on the fraud scale, 0.0 to 1.0.
    pub confidence: Confidence,
    /// Recognized category, if any.
    pub category: Option<ScamCategory>,
    /// Whether the counterpart reads as hostile or probing the decoy.
    pub counterpart_hostile: bool,
}

impl ClassifierVerdict {
    /// Creates a positive verdict.
    pub fn scam(confidence: Confidence, category: Option<ScamCategory>) -> Self {
        Self {
            is_scam: true,
            confidence,
            category,
            counterpart_hostile: false,
        }
    }

    /// Creates a negative verdict.
    pub fn safe(confidence: Confidence) -> Self {
        Self {
            is_scam: false,
            confidence,
            category: None,
            counterpart_hostile: false,
        }
    }

    /// Flags the counterpart as hostile.
    pub fn with_hostile(mut self, hostile: bool) -> Self {
        self.counterpart_hostile = hostile;
        self
    }
}

/// Classification collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Request exceeded the configured timeout.
    #[error("classification timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Collaborator is unavailable.
    #[error("classifier unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Rate limited by the collaborator.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u64,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the collaborator's response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ClassifierError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// True if a retry inside the adapter's own budget could help.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClassifierError::Timeout { .. }
                | ClassifierError::Unavailable { .. }
                | ClassifierError::RateLimited { .. }
                | ClassifierError::Network(_)
        )
    }
}
