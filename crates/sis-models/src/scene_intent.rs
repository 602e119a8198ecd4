//! Scene Intent Schema: the per-scene analysis output.

use chrono::{DateTime, Utc};
use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::dynamics::{PacingMetadata, PowerDynamics};
use crate::emotion::{EmotionType, EmotionalArc};
use crate::visual::VisualSignals;

/// Current schema version emitted in every [`SceneIntent`].
pub const SCHEMA_VERSION: &str = "1.0";

/// Unique analysis identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AnalysisId(pub String);

impl AnalysisId {
    /// Generate a new random analysis ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AnalysisId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One timed narrative unit of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Beat {
    /// `{analysis_id}-{scene_number}-{element_index}`
    pub beat_id: String,

    /// 1-based position within the scene
    pub beat_number: u32,

    /// Start time in seconds
    pub timestamp_start: f64,

    /// End time in seconds
    pub timestamp_end: f64,

    #[serde(default)]
    pub dialogue: Vec<String>,

    #[serde(default)]
    pub action: Vec<String>,

    #[serde(default)]
    pub characters: Vec<String>,

    pub emotional_arc: EmotionalArc,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_dynamics: Option<PowerDynamics>,

    pub pacing: PacingMetadata,

    pub visual_signals: VisualSignals,

    /// Shorthand production tags (technique, movement, framing)
    #[serde(default)]
    pub technical_tags: Vec<String>,
}

impl Beat {
    pub fn duration(&self) -> f64 {
        self.timestamp_end - self.timestamp_start
    }
}

/// Source screenplay information for a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScriptMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub scene_number: u32,

    pub location: String,

    pub time_of_day: String,

    /// Distinct speaking characters, in order of first appearance
    #[serde(default)]
    pub characters_present: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,

    /// Total timed length of the scene in seconds
    pub estimated_duration_seconds: f64,
}

/// Complete analysis of one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SceneIntent {
    pub schema_version: String,

    pub generated_at: DateTime<Utc>,

    pub analysis_id: AnalysisId,

    pub script_metadata: ScriptMetadata,

    /// Ordered beats, never empty
    pub beats: Vec<Beat>,

    pub scene_dominant_emotion: EmotionType,

    /// Distinct primary emotions, in order of first appearance
    pub scene_emotional_range: Vec<EmotionType>,

    /// Mean primary intensity across beats (0-100)
    pub scene_intensity_average: u8,

    pub scene_visual_summary: VisualSignals,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_seconds: Option<f64>,

    /// Model name per analysis stage
    #[serde(default)]
    pub model_versions: HashMap<String, String>,

    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Schema invariant violations.
#[derive(Debug, Error, PartialEq)]
pub enum SceneIntentError {
    #[error("Scene intent has no beats")]
    NoBeats,

    #[error("Beat {beat_number} ends at {end} which is not after its start {start}")]
    EmptyBeat { beat_number: u32, start: f64, end: f64 },

    #[error("Beat {beat_number} starts at {start} before the previous beat ended at {previous_end}")]
    OverlappingBeats {
        beat_number: u32,
        start: f64,
        previous_end: f64,
    },

    #[error("Beat {beat_number} has number out of sequence (expected {expected})")]
    BeatOutOfSequence { beat_number: u32, expected: u32 },

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

impl SceneIntent {
    /// Check structural invariants: at least one beat, beats numbered from 1,
    /// timestamps strictly increasing within a beat and non-overlapping
    /// across beats, scores within their ranges.
    pub fn validate(&self) -> Result<(), SceneIntentError> {
        if self.beats.is_empty() {
            return Err(SceneIntentError::NoBeats);
        }

        if self.scene_intensity_average > 100 {
            return Err(SceneIntentError::OutOfRange {
                field: "scene_intensity_average",
                value: self.scene_intensity_average as f64,
            });
        }

        let mut previous_end = 0.0;
        for (idx, beat) in self.beats.iter().enumerate() {
            let expected = idx as u32 + 1;
            if beat.beat_number != expected {
                return Err(SceneIntentError::BeatOutOfSequence {
                    beat_number: beat.beat_number,
                    expected,
                });
            }

            if beat.duration() <= 0.0 {
                return Err(SceneIntentError::EmptyBeat {
                    beat_number: beat.beat_number,
                    start: beat.timestamp_start,
                    end: beat.timestamp_end,
                });
            }

            if beat.timestamp_start < previous_end {
                return Err(SceneIntentError::OverlappingBeats {
                    beat_number: beat.beat_number,
                    start: beat.timestamp_start,
                    previous_end,
                });
            }
            previous_end = beat.timestamp_end;

            let confidence = beat.emotional_arc.primary_emotion.confidence;
            if !(0.0..=1.0).contains(&confidence) {
                return Err(SceneIntentError::OutOfRange {
                    field: "confidence",
                    value: confidence,
                });
            }

            if beat.emotional_arc.overall_intensity > 100 {
                return Err(SceneIntentError::OutOfRange {
                    field: "overall_intensity",
                    value: beat.emotional_arc.overall_intensity as f64,
                });
            }
        }

        Ok(())
    }

    pub fn total_duration(&self) -> f64 {
        self.beats.last().map(|b| b.timestamp_end).unwrap_or(0.0)
    }
}

/// JSON schema describing a [`SceneIntent`] document.
pub fn scene_intent_json_schema() -> RootSchema {
    schema_for!(SceneIntent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::Rhythm;
    use crate::emotion::EmotionDetection;
    use crate::visual::{CameraParameters, ColorPalette, LightingParameters};

    fn signals() -> VisualSignals {
        VisualSignals {
            colors: ColorPalette {
                primary_colors: vec!["#808080".to_string()],
                secondary_colors: vec![],
                accent_colors: vec![],
                saturation: 50,
                brightness: 50,
                harmony_type: None,
            },
            lighting: LightingParameters::default(),
            camera: CameraParameters::default(),
            reasoning: String::new(),
            confidence_score: 0.5,
            film_references: vec![],
            alternative_options: None,
        }
    }

    fn beat(number: u32, start: f64, end: f64) -> Beat {
        Beat {
            beat_id: format!("job-1-{}", number),
            beat_number: number,
            timestamp_start: start,
            timestamp_end: end,
            dialogue: vec![],
            action: vec!["He waits.".to_string()],
            characters: vec![],
            emotional_arc: EmotionalArc::single(EmotionDetection::new(EmotionType::Tension, 0.7, 60)),
            power_dynamics: None,
            pacing: PacingMetadata::new(60, Rhythm::Slow, 4.0, 0.0),
            visual_signals: signals(),
            technical_tags: vec![],
        }
    }

    fn intent(beats: Vec<Beat>) -> SceneIntent {
        SceneIntent {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            analysis_id: AnalysisId::from_string("job"),
            script_metadata: ScriptMetadata {
                title: None,
                scene_number: 1,
                location: "CAFE".to_string(),
                time_of_day: "DAY".to_string(),
                characters_present: vec![],
                page_number: None,
                estimated_duration_seconds: 2.0,
            },
            beats,
            scene_dominant_emotion: EmotionType::Tension,
            scene_emotional_range: vec![EmotionType::Tension],
            scene_intensity_average: 60,
            scene_visual_summary: signals(),
            processing_time_seconds: None,
            model_versions: HashMap::new(),
            warnings: vec![],
        }
    }

    #[test]
    fn test_analysis_id() {
        let a = AnalysisId::new();
        let b = AnalysisId::new();
        assert_ne!(a, b);
        assert_eq!(AnalysisId::from_string("abc").to_string(), "abc");
        let json = serde_json::to_string(&AnalysisId::from_string("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }

    #[test]
    fn test_validate_ok() {
        let i = intent(vec![beat(1, 0.0, 1.0), beat(2, 1.0, 2.4)]);
        assert!(i.validate().is_ok());
        assert_eq!(i.total_duration(), 2.4);
    }

    #[test]
    fn test_reversed_beat_is_empty() {
        assert_eq!(beat(1, 0.0, 1.5).duration(), 1.5);

        let err = intent(vec![beat(1, 2.0, 1.0)]).validate().unwrap_err();
        assert!(matches!(err, SceneIntentError::EmptyBeat { beat_number: 1, .. }));
    }

    #[test]
    fn test_validate_gap_allowed() {
        let i = intent(vec![beat(1, 0.0, 1.0), beat(2, 3.0, 4.0)]);
        assert!(i.validate().is_ok());
    }

    #[test]
    fn test_validate_failures() {
        assert_eq!(intent(vec![]).validate(), Err(SceneIntentError::NoBeats));

        let err = intent(vec![beat(1, 1.0, 1.0)]).validate().unwrap_err();
        assert!(matches!(err, SceneIntentError::EmptyBeat { .. }));

        let err = intent(vec![beat(1, 0.0, 2.0), beat(2, 1.0, 3.0)])
            .validate()
            .unwrap_err();
        assert!(matches!(err, SceneIntentError::OverlappingBeats { .. }));

        let err = intent(vec![beat(2, 0.0, 1.0)]).validate().unwrap_err();
        assert!(matches!(err, SceneIntentError::BeatOutOfSequence { expected: 1, .. }));

        let mut i = intent(vec![beat(1, 0.0, 1.0)]);
        i.scene_intensity_average = 140;
        assert!(matches!(i.validate(), Err(SceneIntentError::OutOfRange { .. })));
    }

    #[test]
    fn test_json_schema_lists_fields() {
        let schema = serde_json::to_value(scene_intent_json_schema()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("beats").is_some());
        assert!(properties.get("scene_dominant_emotion").is_some());
        assert!(properties.get("scene_visual_summary").is_some());
    }
}
