//! Session module - per-conversation durable state.

mod aggregate;

pub use aggregate::{FinalSummary, Session, SessionStatus, TurnRecord};
