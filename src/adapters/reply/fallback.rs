//! Fallback reply generator - wrapper that guarantees a reply.
//!
//! Tries the primary engagement collaborator first; on any failure falls
//! through to an ordered list of canned replies for the current mode, so
//! reply generation never surfaces an error. The strategies share one
//! budget: the primary's timeout is its own, and the canned list is
//! instantaneous.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

use crate::domain::engagement::EngagementMode;
use crate::ports::{GeneratedReply, ReplyError, ReplyGenerator, ReplyRequest};

/// Ordered canned replies per engagement mode.
///
/// Rotation order is fixed; the wrapper walks the list so consecutive
/// fallbacks do not repeat the same line.
#[derive(Debug, Clone)]
pub struct CannedReplies {
    cautious: Vec<String>,
    aggressive: Vec<String>,
}

impl CannedReplies {
    /// Creates canned reply lists.
    pub fn new(cautious: Vec<String>, aggressive: Vec<String>) -> Self {
        Self {
            cautious,
            aggressive,
        }
    }

    fn list_for(&self, mode: EngagementMode) -> &[String] {
        match mode {
            EngagementMode::Aggressive => &self.aggressive,
            _ => &self.cautious,
        }
    }
}

impl Default for CannedReplies {
    fn default() -> Self {
        Self {
            cautious: vec![
                "sorry, who is this?".to_string(),
                "I don't understand, can you explain?".to_string(),
                "which company are you calling from?".to_string(),
            ],
            aggressive: vec![
                "oh no, what do I need to do?".to_string(),
                "I'm not good with phones, can you walk me through it?".to_string(),
                "it says error, should I send it somewhere else?".to_string(),
                "my internet is slow, give me a minute".to_string(),
            ],
        }
    }
}

/// Reply generator wrapper with ordered canned fallback.
pub struct FallbackReplyGenerator<G: ReplyGenerator> {
    primary: G,
    canned: CannedReplies,
    cursor: AtomicUsize,
}

impl<G: ReplyGenerator> FallbackReplyGenerator<G> {
    /// Wraps a primary generator with the default canned lists.
    pub fn new(primary: G) -> Self {
        Self {
            primary,
            canned: CannedReplies::default(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Replaces the canned reply lists.
    pub fn with_canned(mut self, canned: CannedReplies) -> Self {
        self.canned = canned;
        self
    }

    fn next_canned(&self, mode: EngagementMode) -> GeneratedReply {
        let list = self.canned.list_for(mode);
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        let text = list
            .get(index % list.len().max(1))
            .cloned()
            .unwrap_or_else(|| "sorry, can you repeat that?".to_string());
        GeneratedReply::fallback(text)
    }
}

#[async_trait]
impl<G: ReplyGenerator> ReplyGenerator for FallbackReplyGenerator<G> {
    async fn generate(&self, request: ReplyRequest) -> Result<GeneratedReply, ReplyError> {
        let mode = request.mode;
        match self.primary.generate(request).await {
            Ok(reply) => Ok(reply),
            Err(err) => {
                warn!(error = %err, "primary reply generator failed, using canned reply");
                Ok(self.next_canned(mode))
            }
        }
    }
}
