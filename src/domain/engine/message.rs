//! Inbound message types.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Control text that ends a conversation and requests the final summary.
///
/// Delivered in-band so the core stays transport-agnostic.
pub const END_OF_CONVERSATION: &str = "__end_conversation__";

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The (suspected) scammer on the other side.
    Counterpart,
    /// Our decoy persona.
    Subject,
}

/// One message in a conversation. Immutable once received; history is
/// appended by the caller and read-only to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Who sent it.
    pub sender: Sender,
    /// Raw message text.
    pub text: String,
    /// When it was received.
    pub timestamp: Timestamp,
}

impl InboundMessage {
    /// Creates a message stamped now.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Timestamp::now(),
        }
    }

    /// Creates a counterpart message stamped now.
    pub fn counterpart(text: impl Into<String>) -> Self {
        Self::new(Sender::Counterpart, text)
    }

    /// Creates a decoy-side message stamped now.
    pub fn subject(text: impl Into<String>) -> Self {
        Self::new(Sender::Subject, text)
    }

    /// Sets an explicit timestamp.
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// True for the distinguished end-of-conversation control message.
    pub fn is_end_signal(&self) -> bool {
        self.text.trim() == END_OF_CONVERSATION
    }
}

/// Caller-supplied metadata accompanying a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMetadata {
    /// Channel the conversation arrived on (sms, whatsapp, email, ...).
    pub channel: Option<String>,
    /// Trace ID for correlating logs across collaborators.
    pub trace_id: Option<String>,
}

impl TurnMetadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the channel.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Sets the trace ID.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_signal_detected_with_surrounding_whitespace() {
        let msg = InboundMessage::counterpart(format!("  {}  ", END_OF_CONVERSATION));
        assert!(msg.is_end_signal());
    }

    #[test]
    fn ordinary_text_is_not_end_signal() {
        assert!(!InboundMessage::counterpart("hello").is_end_signal());
        assert!(!InboundMessage::counterpart("the end").is_end_signal());
    }

    #[test]
    fn constructors_set_sender() {
        assert_eq!(InboundMessage::counterpart("x").sender, Sender::Counterpart);
        assert_eq!(InboundMessage::subject("x").sender, Sender::Subject);
    }

    #[test]
    fn metadata_builder_works() {
        let meta = TurnMetadata::new()
            .with_channel("sms")
            .with_trace_id("trace-1");
        assert_eq!(meta.channel.as_deref(), Some("sms"));
        assert_eq!(meta.trace_id.as_deref(), Some("trace-1"));
    }
}
