//! Outcome reporter adapters.

mod logging;

pub use logging::LoggingOutcomeReporter;
