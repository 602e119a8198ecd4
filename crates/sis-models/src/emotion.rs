//! Emotion taxonomy and classifier output models.
//!
//! The taxonomy is split into three tiers:
//!
//! - Primary: the six basic emotions
//! - Secondary: blends and moods derived from the basic set
//! - Tertiary: narrative-level states (hope, betrayal, dread, ...)

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hierarchy tier of an emotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmotionCategory {
    Primary,
    Secondary,
    Tertiary,
}

impl EmotionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionCategory::Primary => "primary",
            EmotionCategory::Secondary => "secondary",
            EmotionCategory::Tertiary => "tertiary",
        }
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complete emotion taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmotionType {
    // Primary
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,

    // Secondary
    Tension,
    Melancholy,
    Euphoria,
    Anxiety,
    Nostalgia,
    Loneliness,

    // Tertiary
    Hope,
    Despair,
    Triumph,
    Betrayal,
    Confusion,
    Serenity,
    Dread,
    Passion,
}

impl EmotionType {
    /// Every emotion in taxonomy order.
    pub const ALL: &'static [EmotionType] = &[
        EmotionType::Joy,
        EmotionType::Sadness,
        EmotionType::Anger,
        EmotionType::Fear,
        EmotionType::Surprise,
        EmotionType::Disgust,
        EmotionType::Tension,
        EmotionType::Melancholy,
        EmotionType::Euphoria,
        EmotionType::Anxiety,
        EmotionType::Nostalgia,
        EmotionType::Loneliness,
        EmotionType::Hope,
        EmotionType::Despair,
        EmotionType::Triumph,
        EmotionType::Betrayal,
        EmotionType::Confusion,
        EmotionType::Serenity,
        EmotionType::Dread,
        EmotionType::Passion,
    ];

    /// Lowercase name, also used as the knowledge-base lookup key.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionType::Joy => "joy",
            EmotionType::Sadness => "sadness",
            EmotionType::Anger => "anger",
            EmotionType::Fear => "fear",
            EmotionType::Surprise => "surprise",
            EmotionType::Disgust => "disgust",
            EmotionType::Tension => "tension",
            EmotionType::Melancholy => "melancholy",
            EmotionType::Euphoria => "euphoria",
            EmotionType::Anxiety => "anxiety",
            EmotionType::Nostalgia => "nostalgia",
            EmotionType::Loneliness => "loneliness",
            EmotionType::Hope => "hope",
            EmotionType::Despair => "despair",
            EmotionType::Triumph => "triumph",
            EmotionType::Betrayal => "betrayal",
            EmotionType::Confusion => "confusion",
            EmotionType::Serenity => "serenity",
            EmotionType::Dread => "dread",
            EmotionType::Passion => "passion",
        }
    }

    /// Tier this emotion belongs to.
    pub fn category(&self) -> EmotionCategory {
        match self {
            EmotionType::Joy
            | EmotionType::Sadness
            | EmotionType::Anger
            | EmotionType::Fear
            | EmotionType::Surprise
            | EmotionType::Disgust => EmotionCategory::Primary,
            EmotionType::Tension
            | EmotionType::Melancholy
            | EmotionType::Euphoria
            | EmotionType::Anxiety
            | EmotionType::Nostalgia
            | EmotionType::Loneliness => EmotionCategory::Secondary,
            EmotionType::Hope
            | EmotionType::Despair
            | EmotionType::Triumph
            | EmotionType::Betrayal
            | EmotionType::Confusion
            | EmotionType::Serenity
            | EmotionType::Dread
            | EmotionType::Passion => EmotionCategory::Tertiary,
        }
    }
}

impl fmt::Display for EmotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmotionType {
    type Err = EmotionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        EmotionType::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == lower)
            .ok_or_else(|| EmotionParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown emotion: {0}")]
pub struct EmotionParseError(String);

/// A single detected emotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmotionDetection {
    /// Detected emotion type
    pub emotion: EmotionType,
    /// Taxonomy tier
    pub category: EmotionCategory,
    /// Confidence score (0-1, two decimals)
    pub confidence: f64,
    /// Emotional intensity (0-100)
    pub intensity: u8,
}

impl EmotionDetection {
    /// Create a detection, deriving the category from the emotion.
    ///
    /// Confidence is clamped to `[0, 1]` and rounded to two decimals,
    /// intensity is capped at 100.
    pub fn new(emotion: EmotionType, confidence: f64, intensity: u8) -> Self {
        Self {
            emotion,
            category: emotion.category(),
            confidence: round_confidence(confidence),
            intensity: intensity.min(100),
        }
    }
}

fn round_confidence(value: f64) -> f64 {
    (value.clamp(0.0, 1.0) * 100.0).round() / 100.0
}

/// Emotional profile for a beat or a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmotionalArc {
    /// Scene identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,

    /// Segment identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<String>,

    /// Dominant emotion
    pub primary_emotion: EmotionDetection,

    /// Additional detected emotions, highest confidence first
    #[serde(default)]
    pub secondary_emotions: Vec<EmotionDetection>,

    /// Whether more than one emotion was detected
    #[serde(default)]
    pub mixed_emotions: bool,

    /// Whether the emotion changes within this unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_shift: Option<bool>,

    /// Overall emotional intensity (0-100)
    pub overall_intensity: u8,
}

impl EmotionalArc {
    /// Arc built from a single detection with no secondaries.
    pub fn single(primary: EmotionDetection) -> Self {
        let overall_intensity = primary.intensity;
        Self {
            scene_id: None,
            segment_id: None,
            primary_emotion: primary,
            secondary_emotions: Vec::new(),
            mixed_emotions: false,
            emotional_shift: None,
            overall_intensity,
        }
    }

    /// Neutral arc returned for empty or unclassifiable text.
    ///
    /// The taxonomy has no "neutral" value, so serenity at zero
    /// confidence and zero intensity stands in for it.
    pub fn neutral() -> Self {
        let mut arc = Self::single(EmotionDetection::new(EmotionType::Serenity, 0.0, 0));
        arc.emotional_shift = Some(false);
        arc
    }

    /// Primary emotion type.
    pub fn emotion(&self) -> EmotionType {
        self.primary_emotion.emotion
    }

    /// Primary emotion intensity.
    pub fn intensity(&self) -> u8 {
        self.primary_emotion.intensity
    }
}
