//! Emotion service HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use sis_models::EmotionalArc;
use tracing::{debug, warn};

use crate::classifier::EmotionClassifier;
use crate::error::{ClassifierError, ClassifierResult};
use crate::goemotions::{GoEmotionsMapper, DEFAULT_CONFIDENCE_THRESHOLD};
use crate::types::{ClassifyRequest, ClassifyResponse, HealthResponse, LabelScore};

pub const DEFAULT_MODEL_NAME: &str = "SamLowe/roberta-base-go_emotions";

/// Configuration for the emotion service client.
#[derive(Debug, Clone)]
pub struct EmotionClientConfig {
    /// Base URL of the emotion service
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Max retries on transient failures
    pub max_retries: u32,
    /// Minimum summed score for a detection
    pub confidence_threshold: f64,
    /// Model identifier reported in output
    pub model_name: String,
}

impl Default for EmotionClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 0,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            model_name: DEFAULT_MODEL_NAME.to_string(),
        }
    }
}

impl EmotionClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("EMOTION_SERVICE_URL").unwrap_or(defaults.base_url),
            timeout: std::env::var("EMOTION_SERVICE_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            max_retries: std::env::var("EMOTION_SERVICE_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_retries),
            confidence_threshold: std::env::var("EMOTION_CONFIDENCE_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.confidence_threshold),
            model_name: std::env::var("EMOTION_MODEL_NAME").unwrap_or(defaults.model_name),
        }
    }
}

/// Emotion classifier backed by a remote text-classification service.
pub struct HttpEmotionClassifier {
    http: Client,
    config: EmotionClientConfig,
    mapper: GoEmotionsMapper,
}

impl HttpEmotionClassifier {
    pub fn new(config: EmotionClientConfig) -> ClassifierResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClassifierError::Network)?;
        let mapper = GoEmotionsMapper::new(config.confidence_threshold);

        Ok(Self {
            http,
            config,
            mapper,
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClassifierResult<Self> {
        Self::new(EmotionClientConfig::from_env())
    }

    pub fn config(&self) -> &EmotionClientConfig {
        &self.config
    }

    /// Check if the emotion service is healthy.
    pub async fn health_check(&self) -> ClassifierResult<bool> {
        let url = format!("{}/health", self.config.base_url);

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let health: HealthResponse = response.json().await?;
                Ok(health.status == "healthy" || health.status == "ok")
            }
            Ok(response) => {
                warn!(status = %response.status(), "Emotion service health check failed");
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "Emotion service health check error");
                Ok(false)
            }
        }
    }

    /// Raw label scores for `text`.
    pub async fn classify(&self, text: &str) -> ClassifierResult<Vec<LabelScore>> {
        let url = format!("{}/classify", self.config.base_url);
        let request = ClassifyRequest {
            inputs: text.to_string(),
        };

        debug!(url = %url, chars = text.len(), "Sending emotion classification request");

        let response = self
            .with_retry(|| async {
                let response = self
                    .http
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(ClassifierError::Network)?;

                let status = response.status();
                if status.is_server_error() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(ClassifierError::ServiceUnavailable(format!(
                        "emotion service returned {}: {}",
                        status, body
                    )));
                }
                Ok(response)
            })
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::request_failed(format!(
                "emotion service returned {}: {}",
                status, body
            )));
        }

        let body = response.bytes().await?;
        let parsed: ClassifyResponse = serde_json::from_slice(&body)?;
        let scores = parsed.into_scores();
        if scores.is_empty() {
            return Err(ClassifierError::invalid_response("no label scores returned"));
        }

        Ok(scores)
    }

    /// Execute with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> ClassifierResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = ClassifierResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(250 * 2u64.pow(attempt));
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Emotion request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ClassifierError::request_failed("Unknown error")))
    }
}

#[async_trait]
impl EmotionClassifier for HttpEmotionClassifier {
    async fn analyze(&self, text: &str) -> ClassifierResult<EmotionalArc> {
        if text.trim().is_empty() {
            return Ok(EmotionalArc::neutral());
        }

        let scores = self.classify(text).await?;
        Ok(self.mapper.to_arc(&scores))
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}
