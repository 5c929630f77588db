//! Mock classifier for testing.
//!
//! Configurable to return scripted verdicts, simulate delays, or inject
//! errors, so tests run without a real classification collaborator.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    ClassificationRequest, ClassifierError, ClassifierVerdict, ScamClassifier,
};

enum MockOutcome {
    Verdict(ClassifierVerdict),
    Error(ClassifierError),
}

/// Mock scam classifier.
///
/// Scripted outcomes are consumed in order; once exhausted (or when none
/// were configured) a neutral low-confidence verdict is returned.
#[derive(Clone)]
pub struct MockClassifier {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<ClassificationRequest>>>,
}

impl MockClassifier {
    /// Creates a mock with no scripted outcomes.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a verdict.
    pub fn with_verdict(self, verdict: ClassifierVerdict) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Verdict(verdict));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: ClassifierError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Simulates latency on every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of classify calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Requests received, in order.
    pub fn calls(&self) -> Vec<ClassificationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScamClassifier for MockClassifier {
    async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<ClassifierVerdict, ClassifierError> {
        self.calls.lock().unwrap().push(request);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Verdict(verdict)) => Ok(verdict),
            Some(MockOutcome::Error(error)) => Err(error),
            None => Ok(ClassifierVerdict::safe(
                crate::domain::foundation::Confidence::new(0.1),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detection::ScamCategory;
    use crate::domain::foundation::Confidence;

    #[tokio::test]
    async fn returns_scripted_verdicts_in_order() {
        let mock = MockClassifier::new()
            .with_verdict(ClassifierVerdict::safe(Confidence::new(0.2)))
            .with_verdict(ClassifierVerdict::scam(
                Confidence::new(0.72),
                Some(ScamCategory::AccountThreat),
            ));

        let first = mock
            .classify(ClassificationRequest::new("hi"))
            .await
            .unwrap();
        assert!(!first.is_scam);

        let second = mock
            .classify(ClassificationRequest::new("account issue"))
            .await
            .unwrap();
        assert!(second.is_scam);
        assert_eq!(second.confidence, Confidence::new(0.72));
    }

    #[tokio::test]
    async fn returns_scripted_errors() {
        let mock = MockClassifier::new().with_error(ClassifierError::Timeout { timeout_secs: 8 });
        let result = mock.classify(ClassificationRequest::new("hi")).await;
        assert!(matches!(result, Err(ClassifierError::Timeout { .. })));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let mock = MockClassifier::new();
        mock.classify(ClassificationRequest::new("one")).await.unwrap();
        mock.classify(ClassificationRequest::new("two")).await.unwrap();

        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.calls()[1].text, "two");
    }

    #[tokio::test]
    async fn exhausted_script_returns_neutral_verdict() {
        let mock = MockClassifier::new();
        let verdict = mock.classify(ClassificationRequest::new("hi")).await.unwrap();
        assert!(!verdict.is_scam);
        assert!(verdict.confidence.value() < 0.4);
    }
}
