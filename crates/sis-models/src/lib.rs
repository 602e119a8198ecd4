//! Shared data models for the Scene Intent engine.
//!
//! This crate provides Serde-serializable types for:
//! - Parsed screenplay scenes and elements
//! - Emotion taxonomy and classifier output
//! - Power and pacing estimates
//! - Color, lighting and camera recommendations
//! - The Scene Intent Schema output document

pub mod dynamics;
pub mod emotion;
pub mod scene_intent;
pub mod screenplay;
pub mod visual;

// Re-export common types
pub use dynamics::{
    DynamicsParseError, PacingMetadata, PowerBalance, PowerDynamics, Rhythm, MAX_BPM, MIN_BPM,
};
pub use emotion::{EmotionCategory, EmotionDetection, EmotionParseError, EmotionType, EmotionalArc};
pub use scene_intent::{
    scene_intent_json_schema, AnalysisId, Beat, SceneIntent, SceneIntentError, ScriptMetadata,
    SCHEMA_VERSION,
};
pub use screenplay::{
    DialogueLine, Element, ElementType, ElementTypeParseError, Scene, UNKNOWN_TIME_OF_DAY,
};
pub use visual::{
    CameraAngleHorizontal, CameraAngleVertical, CameraMovement, CameraParameters, ColorPalette,
    DepthOfField, HarmonyType, LightIntensity, LightingDirection, LightingParameters,
    LightingTechnique, MovementSpeed, ShadowType, ShotSize, VisualSignals,
    MAX_TEMPERATURE_KELVIN, MIN_TEMPERATURE_KELVIN,
};
