//! Per-beat power and pacing estimates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Overall balance of power in a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PowerBalance {
    Dominant,
    Submissive,
    Equal,
    Shifting,
}

impl PowerBalance {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerBalance::Dominant => "dominant",
            PowerBalance::Submissive => "submissive",
            PowerBalance::Equal => "equal",
            PowerBalance::Shifting => "shifting",
        }
    }
}

impl fmt::Display for PowerBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PowerBalance {
    type Err = DynamicsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dominant" => Ok(PowerBalance::Dominant),
            "submissive" => Ok(PowerBalance::Submissive),
            "equal" => Ok(PowerBalance::Equal),
            "shifting" => Ok(PowerBalance::Shifting),
            _ => Err(DynamicsParseError::PowerBalance(s.to_string())),
        }
    }
}

/// Character power relationship for a beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PowerDynamics {
    /// Character holding power, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_character: Option<String>,

    /// Overall power balance
    pub power_balance: PowerBalance,

    /// Power intensity (0 = weak, 100 = strong)
    pub power_score: u8,
}

impl PowerDynamics {
    pub fn new(balance: PowerBalance, score: u8) -> Self {
        Self {
            dominant_character: None,
            power_balance: balance,
            power_score: score.min(100),
        }
    }

    pub fn with_dominant_character(mut self, character: impl Into<String>) -> Self {
        self.dominant_character = Some(character.into());
        self
    }
}

/// Editing rhythm, from slowest to fastest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rhythm {
    VerySlow,
    Slow,
    #[default]
    Medium,
    Fast,
    VeryFast,
}

impl Rhythm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rhythm::VerySlow => "very_slow",
            Rhythm::Slow => "slow",
            Rhythm::Medium => "medium",
            Rhythm::Fast => "fast",
            Rhythm::VeryFast => "very_fast",
        }
    }

    pub fn is_fast(&self) -> bool {
        matches!(self, Rhythm::Fast | Rhythm::VeryFast)
    }

    pub fn is_slow(&self) -> bool {
        matches!(self, Rhythm::Slow | Rhythm::VerySlow)
    }
}

impl fmt::Display for Rhythm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Rhythm {
    type Err = DynamicsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "very_slow" => Ok(Rhythm::VerySlow),
            "slow" => Ok(Rhythm::Slow),
            "medium" => Ok(Rhythm::Medium),
            "fast" => Ok(Rhythm::Fast),
            "very_fast" => Ok(Rhythm::VeryFast),
            _ => Err(DynamicsParseError::Rhythm(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum DynamicsParseError {
    #[error("Unknown power balance: {0}")]
    PowerBalance(String),

    #[error("Unknown rhythm: {0}")]
    Rhythm(String),
}

/// Lowest suggested editing tempo.
pub const MIN_BPM: u16 = 20;

/// Highest suggested editing tempo.
pub const MAX_BPM: u16 = 180;

/// Pacing estimate for a beat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PacingMetadata {
    /// Suggested editing BPM (20-180)
    pub bpm: u16,

    /// Overall pacing rhythm
    pub rhythm: Rhythm,

    /// Mean word length in characters
    pub sentence_avg_length: f64,

    /// Ratio of action verbs (0-1)
    pub verb_density: f64,
}

impl PacingMetadata {
    /// Create pacing metadata, clamping bpm and verb density into range.
    pub fn new(bpm: u16, rhythm: Rhythm, sentence_avg_length: f64, verb_density: f64) -> Self {
        Self {
            bpm: bpm.clamp(MIN_BPM, MAX_BPM),
            rhythm,
            sentence_avg_length,
            verb_density: verb_density.clamp(0.0, 1.0),
        }
    }
}
