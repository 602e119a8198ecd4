//! Emotion classifier interface.

use async_trait::async_trait;
use sis_models::EmotionalArc;

use crate::error::ClassifierResult;

/// Detects the emotional state of a piece of text.
///
/// Empty or whitespace-only text must yield [`EmotionalArc::neutral`]
/// rather than an error.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn analyze(&self, text: &str) -> ClassifierResult<EmotionalArc>;

    /// Model identifier recorded in analysis output.
    fn model_name(&self) -> &str;
}
