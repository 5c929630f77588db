//! Scam classifier adapters.

mod http;
mod mock;

pub use http::{HttpClassifier, HttpClassifierConfig};
pub use mock::MockClassifier;
