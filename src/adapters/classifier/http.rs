//! HTTP classifier - ScamClassifier implementation over a JSON endpoint.
//!
//! Speaks a small chat-completion-style protocol with the semantic
//! classification collaborator. The request timeout is owned by the HTTP
//! client; transient failures are retried inside this adapter's own
//! bounded budget, never past it.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

use crate::domain::detection::ScamCategory;
use crate::domain::engine::Sender;
use crate::domain::foundation::Confidence;
use crate::ports::{
    ClassificationRequest, ClassifierError, ClassifierVerdict, ScamClassifier,
};

/// Base delay between retry attempts; doubles per attempt.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(250);

/// Configuration for the HTTP classifier.
#[derive(Debug, Clone)]
pub struct HttpClassifierConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Classification endpoint URL.
    pub endpoint: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl HttpClassifierConfig {
    /// Creates a configuration with the given endpoint and API key.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            endpoint: endpoint.into(),
            model: "scam-screen-v2".to_string(),
            timeout: Duration::from_secs(8),
            max_retries: 2,
        }
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// HTTP implementation of the ScamClassifier port.
pub struct HttpClassifier {
    config: HttpClassifierConfig,
    client: Client,
}

impl HttpClassifier {
    /// Creates a classifier with the given configuration.
    pub fn new(config: HttpClassifierConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn to_wire_request(&self, request: &ClassificationRequest) -> WireRequest {
        WireRequest {
            model: self.config.model.clone(),
            message: request.text.clone(),
            history: request
                .history
                .iter()
                .map(|m| WireMessage {
                    role: match m.sender {
                        Sender::Counterpart => "counterpart",
                        Sender::Subject => "subject",
                    },
                    text: m.text.clone(),
                })
                .collect(),
            previous_confidence: request
                .previous_signal
                .as_ref()
                .map(|s| s.confidence.value()),
            channel: request.metadata.channel.clone(),
        }
    }

    async fn send_once(&self, wire: &WireRequest, request_id: &str) -> Result<ClassifierVerdict, ClassifierError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key())
            .header("x-request-id", request_id)
            .json(wire)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    ClassifierError::network(e.to_string())
                }
            })?;

        self.parse_response(response).await
    }

    async fn parse_response(&self, response: Response) -> Result<ClassifierVerdict, ClassifierError> {
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ClassifierError::AuthenticationFailed);
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30);
                return Err(ClassifierError::RateLimited { retry_after_secs });
            }
            status if status.is_server_error() => {
                return Err(ClassifierError::unavailable(format!(
                    "server returned {}",
                    status
                )));
            }
            status if !status.is_success() => {
                return Err(ClassifierError::unavailable(format!(
                    "unexpected status {}",
                    status
                )));
            }
            _ => {}
        }

        let wire: WireVerdict = response
            .json()
            .await
            .map_err(|e| ClassifierError::parse(e.to_string()))?;

        Ok(ClassifierVerdict {
            is_scam: wire.is_scam,
            confidence: Confidence::new(wire.confidence),
            category: wire.category,
            counterpart_hostile: wire.counterpart_hostile,
        })
    }
}

#[async_trait]
impl ScamClassifier for HttpClassifier {
    async fn classify(
        &self,
        request: ClassificationRequest,
    ) -> Result<ClassifierVerdict, ClassifierError> {
        let wire = self.to_wire_request(&request);
        let request_id = uuid::Uuid::new_v4().to_string();

        let mut attempt = 0;
        loop {
            match self.send_once(&wire, &request_id).await {
                Ok(verdict) => return Ok(verdict),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    debug!(request_id = %request_id, attempt, error = %err, "retrying classification");
                    sleep(RETRY_BASE_DELAY * 2u32.pow(attempt)).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    message: String,
    history: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_confidence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    text: String,
}

#[derive(Debug, Deserialize)]
struct WireVerdict {
    is_scam: bool,
    confidence: f64,
    #[serde(default)]
    category: Option<ScamCategory>,
    #[serde(default)]
    counterpart_hostile: bool,
}
