//! Client for the emotion classification service.
//!
//! The service runs a GoEmotions text classifier and returns raw label
//! scores. This crate maps those scores onto the emotion taxonomy and
//! exposes the result through the [`EmotionClassifier`] trait.

pub mod classifier;
pub mod client;
pub mod error;
pub mod goemotions;
pub mod types;

pub use classifier::EmotionClassifier;
pub use client::{EmotionClientConfig, HttpEmotionClassifier, DEFAULT_MODEL_NAME};
pub use error::{ClassifierError, ClassifierResult};
pub use goemotions::{map_label, GoEmotionsMapper, DEFAULT_CONFIDENCE_THRESHOLD};
pub use types::LabelScore;
