//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No valid scenes found in input text")]
    NoValidScenes,

    #[error("Screenplay error: {0}")]
    Screenplay(#[from] sis_screenplay::ScreenplayError),

    #[error("Classifier error: {0}")]
    Classifier(#[from] sis_emotion_client::ClassifierError),
}

impl PipelineError {
    /// Whether the analysis cannot produce any output for this input.
    ///
    /// Classifier failures are recovered per beat inside the pipeline and
    /// only surface here when the HTTP client cannot be built.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineError::NoValidScenes | PipelineError::Screenplay(_))
    }
}
