//! Screenplay analysis pipeline.
//!
//! Parses a screenplay, classifies the emotion of every action and dialogue
//! element, maps each emotion to cinematography recommendations and
//! aggregates the beats into one Scene Intent document per scene.

pub mod aggregation;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod logging;
pub mod metrics;
pub mod orchestrator;

pub use config::{PipelineConfig, WORDS_PER_SECOND};
pub use error::{PipelineError, PipelineResult};
pub use logging::AnalysisLogger;
pub use orchestrator::{SceneIntentPipeline, EMOTION_CLASSIFIER_KEY};
