//! Visual recommendation models: color, lighting and camera.
//!
//! `Default` for each parameter block is the neutral baseline that the
//! visual mapping rules start from.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::dynamics::Rhythm;

/// Vertical camera angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraAngleVertical {
    ExtremeLow,
    Low,
    #[default]
    EyeLevel,
    High,
    ExtremeHigh,
    Overhead,
    WormsEye,
    Dutch,
}

impl CameraAngleVertical {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraAngleVertical::ExtremeLow => "extreme_low",
            CameraAngleVertical::Low => "low",
            CameraAngleVertical::EyeLevel => "eye_level",
            CameraAngleVertical::High => "high",
            CameraAngleVertical::ExtremeHigh => "extreme_high",
            CameraAngleVertical::Overhead => "overhead",
            CameraAngleVertical::WormsEye => "worms_eye",
            CameraAngleVertical::Dutch => "dutch",
        }
    }
}

impl fmt::Display for CameraAngleVertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Horizontal camera angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraAngleHorizontal {
    Frontal,
    #[default]
    ThreeQuarter,
    Profile,
    OverShoulder,
    Pov,
}

/// Camera movement type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum CameraMovement {
    #[default]
    Static,
    Pan,
    Tilt,
    DollyIn,
    DollyOut,
    Track,
    Handheld,
    Steadicam,
    CraneUp,
    CraneDown,
    ZoomIn,
    ZoomOut,
    WhipPan,
    Circle,
}

impl CameraMovement {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMovement::Static => "static",
            CameraMovement::Pan => "pan",
            CameraMovement::Tilt => "tilt",
            CameraMovement::DollyIn => "dolly_in",
            CameraMovement::DollyOut => "dolly_out",
            CameraMovement::Track => "track",
            CameraMovement::Handheld => "handheld",
            CameraMovement::Steadicam => "steadicam",
            CameraMovement::CraneUp => "crane_up",
            CameraMovement::CraneDown => "crane_down",
            CameraMovement::ZoomIn => "zoom_in",
            CameraMovement::ZoomOut => "zoom_out",
            CameraMovement::WhipPan => "whip_pan",
            CameraMovement::Circle => "circle",
        }
    }
}

impl fmt::Display for CameraMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Speed of a camera move.
pub type MovementSpeed = Rhythm;

/// Shot composition size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShotSize {
    ExtremeCloseup,
    Closeup,
    MediumCloseup,
    #[default]
    MediumShot,
    MediumLongShot,
    LongShot,
    ExtremeLongShot,
    TwoShot,
    ThreeShot,
    OverTheShoulder,
}

impl ShotSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotSize::ExtremeCloseup => "extreme_closeup",
            ShotSize::Closeup => "closeup",
            ShotSize::MediumCloseup => "medium_closeup",
            ShotSize::MediumShot => "medium_shot",
            ShotSize::MediumLongShot => "medium_long_shot",
            ShotSize::LongShot => "long_shot",
            ShotSize::ExtremeLongShot => "extreme_long_shot",
            ShotSize::TwoShot => "two_shot",
            ShotSize::ThreeShot => "three_shot",
            ShotSize::OverTheShoulder => "over_the_shoulder",
        }
    }
}

impl fmt::Display for ShotSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Depth of field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum DepthOfField {
    Shallow,
    #[default]
    Medium,
    Deep,
}

/// Primary light direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum LightingDirection {
    Front,
    ThreeQuarter,
    #[default]
    Side,
    RimBack,
    Under,
    Overhead,
    Window,
    Motivated,
}

/// Named lighting technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum LightingTechnique {
    Rembrandt,
    Butterfly,
    Split,
    #[default]
    Loop,
    Broad,
    Short,
    Chiaroscuro,
    Silhouette,
    HighKey,
    LowKey,
}

impl LightingTechnique {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightingTechnique::Rembrandt => "rembrandt",
            LightingTechnique::Butterfly => "butterfly",
            LightingTechnique::Split => "split",
            LightingTechnique::Loop => "loop",
            LightingTechnique::Broad => "broad",
            LightingTechnique::Short => "short",
            LightingTechnique::Chiaroscuro => "chiaroscuro",
            LightingTechnique::Silhouette => "silhouette",
            LightingTechnique::HighKey => "high_key",
            LightingTechnique::LowKey => "low_key",
        }
    }
}

impl fmt::Display for LightingTechnique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall light level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum LightIntensity {
    VeryLow,
    Low,
    #[default]
    Medium,
    High,
    VeryHigh,
}

/// Shadow characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShadowType {
    Diffused,
    #[default]
    Defined,
    Harsh,
    None,
}

/// Color harmony principle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyType {
    Complementary,
    Analogous,
    Triadic,
    Monochromatic,
}

/// Color scheme recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColorPalette {
    /// Primary colors (hex codes)
    pub primary_colors: Vec<String>,

    /// Secondary colors (hex codes)
    #[serde(default)]
    pub secondary_colors: Vec<String>,

    /// Accent colors (hex codes)
    #[serde(default)]
    pub accent_colors: Vec<String>,

    /// Saturation level (0-100)
    pub saturation: u8,

    /// Brightness level (0-100)
    pub brightness: u8,

    /// Color harmony principle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmony_type: Option<HarmonyType>,
}

/// Lowest representable color temperature.
pub const MIN_TEMPERATURE_KELVIN: i32 = 1800;

/// Highest representable color temperature.
pub const MAX_TEMPERATURE_KELVIN: i32 = 10000;

/// Lighting setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LightingParameters {
    /// Hardness (0 = soft, 100 = hard)
    pub quality: u8,

    /// Color temperature in Kelvin
    pub temperature_kelvin: i32,

    /// Primary light direction
    pub direction: LightingDirection,

    /// Light intensity level
    pub intensity: LightIntensity,

    /// Key to fill ratio (e.g. "8:1")
    pub contrast_ratio: String,

    /// Shadow characteristics
    pub shadow_type: ShadowType,

    /// Specific lighting technique
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technique: Option<LightingTechnique>,

    /// Practical light source (window, lamp, fire, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivated_source: Option<String>,

    /// Equipment: softbox, flags, gels, ...
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl Default for LightingParameters {
    fn default() -> Self {
        Self {
            quality: 50,
            temperature_kelvin: 5600, // Daylight
            direction: LightingDirection::Side,
            intensity: LightIntensity::Medium,
            contrast_ratio: "4:1".to_string(),
            shadow_type: ShadowType::Defined,
            technique: Some(LightingTechnique::Loop),
            motivated_source: None,
            modifiers: Vec::new(),
        }
    }
}

impl LightingParameters {
    /// Technique, falling back to the baseline loop lighting.
    pub fn technique_or_default(&self) -> LightingTechnique {
        self.technique.unwrap_or_default()
    }
}

/// Camera setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CameraParameters {
    /// Vertical angle
    pub vertical_angle: CameraAngleVertical,

    /// Horizontal angle
    pub horizontal_angle: CameraAngleHorizontal,

    /// Angle in degrees from eye level (-90..=90)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_degrees: Option<i8>,

    /// Camera movement type
    pub movement: CameraMovement,

    /// Speed of movement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement_speed: Option<MovementSpeed>,

    /// Shot composition size
    pub shot_size: ShotSize,

    /// Lens focal length in mm
    pub focal_length_mm: u16,

    /// Aperture f-stop (e.g. "f/2.8")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aperture: Option<String>,

    /// Depth of field
    pub depth_of_field: DepthOfField,
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            vertical_angle: CameraAngleVertical::EyeLevel,
            horizontal_angle: CameraAngleHorizontal::ThreeQuarter,
            angle_degrees: None,
            movement: CameraMovement::Static,
            movement_speed: None,
            shot_size: ShotSize::MediumShot,
            focal_length_mm: 50,
            aperture: None,
            depth_of_field: DepthOfField::Medium,
        }
    }
}

/// Complete visual recommendation package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VisualSignals {
    /// Color palette
    pub colors: ColorPalette,

    /// Lighting setup
    pub lighting: LightingParameters,

    /// Camera configuration
    pub camera: CameraParameters,

    /// Explanation of the visual choices
    pub reasoning: String,

    /// Overall confidence in the recommendation (0-1)
    pub confidence_score: f64,

    /// Films with a similar visual approach
    #[serde(default)]
    pub film_references: Vec<String>,

    /// Alternative visual approaches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_options: Option<HashMap<String, serde_json::Value>>,
}
