//! Intelligence module - extraction, validation, and accumulation.
//!
//! A turn's intelligence is the union of a deterministic pattern pass over
//! the message text and re-validated candidate entities supplied by the
//! engagement collaborator. Accumulation across turns is a commutative,
//! idempotent set-union per category.

mod candidate;
mod category;
mod collection;
mod extractor;
mod validators;

pub use candidate::CandidateEntity;
pub use category::IntelligenceCategory;
pub use collection::IntelligenceSet;
pub use extractor::IntelligenceExtractor;
pub use validators::validate;
