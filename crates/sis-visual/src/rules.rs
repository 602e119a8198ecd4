//! Ordered override rules for lighting and camera parameters.
//!
//! Each table is folded over the parameter baseline in order. A rule only
//! touches the fields it owns, so a later rule wins for any field both set.
//! Emotion-keyed rules match the taxonomy exhaustively: a new emotion must
//! be placed in every table before this compiles.

use sis_models::{
    CameraAngleVertical, CameraMovement, CameraParameters, DepthOfField, EmotionType,
    LightIntensity, LightingParameters, LightingTechnique, PacingMetadata, PowerBalance,
    PowerDynamics, Rhythm, ShadowType, ShotSize, MAX_TEMPERATURE_KELVIN, MIN_TEMPERATURE_KELVIN,
};

/// Inputs shared by every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub emotion: EmotionType,
    /// Primary emotion intensity (0-100)
    pub intensity: u8,
    pub power: Option<&'a PowerDynamics>,
    pub pacing: Option<&'a PacingMetadata>,
}

/// A named parameter transform.
pub struct Rule<P> {
    pub name: &'static str,
    pub apply: fn(P, &RuleContext<'_>) -> P,
}

/// Fold `rules` over `initial` in table order.
pub fn apply_rules<P>(rules: &[Rule<P>], initial: P, ctx: &RuleContext<'_>) -> P {
    rules.iter().fold(initial, |params, rule| (rule.apply)(params, ctx))
}

pub const LIGHTING_RULES: &[Rule<LightingParameters>] = &[
    Rule {
        name: "quality_and_shadow",
        apply: quality_and_shadow,
    },
    Rule {
        name: "color_temperature",
        apply: color_temperature,
    },
    Rule {
        name: "technique_and_contrast",
        apply: technique_and_contrast,
    },
    Rule {
        name: "temperature_bounds",
        apply: temperature_bounds,
    },
];

pub const CAMERA_RULES: &[Rule<CameraParameters>] = &[
    Rule {
        name: "emotion_angle",
        apply: emotion_angle,
    },
    Rule {
        name: "power_angle",
        apply: power_angle,
    },
    Rule {
        name: "pacing_movement",
        apply: pacing_movement,
    },
    Rule {
        name: "unsettled_handheld",
        apply: unsettled_handheld,
    },
    Rule {
        name: "shot_framing",
        apply: shot_framing,
    },
];

// Lighting

fn quality_and_shadow(mut p: LightingParameters, ctx: &RuleContext<'_>) -> LightingParameters {
    use EmotionType::*;
    let i = ctx.intensity;
    match ctx.emotion {
        Anger | Fear | Tension | Dread => {
            p.quality = i.saturating_add(30).min(100);
            p.shadow_type = ShadowType::Harsh;
        }
        Joy | Passion | Euphoria => {
            p.quality = 100u8.saturating_sub(i);
            p.shadow_type = ShadowType::Diffused;
        }
        Sadness | Surprise | Disgust | Melancholy | Anxiety | Nostalgia | Loneliness | Hope
        | Despair | Triumph | Betrayal | Confusion | Serenity => {}
    }
    p
}

fn color_temperature(mut p: LightingParameters, ctx: &RuleContext<'_>) -> LightingParameters {
    use EmotionType::*;
    let i = ctx.intensity as i32;
    match ctx.emotion {
        Sadness | Loneliness | Despair | Fear => p.temperature_kelvin = 6500 + 20 * i,
        Joy | Nostalgia | Passion | Hope => p.temperature_kelvin = 3200 - 10 * i,
        Anger | Surprise | Disgust | Tension | Melancholy | Euphoria | Anxiety | Triumph
        | Betrayal | Confusion | Serenity | Dread => {}
    }
    p
}

fn technique_and_contrast(mut p: LightingParameters, ctx: &RuleContext<'_>) -> LightingParameters {
    use EmotionType::*;
    match ctx.emotion {
        Fear | Dread | Betrayal => {
            p.technique = Some(LightingTechnique::Chiaroscuro);
            p.contrast_ratio = "16:1".to_string();
            p.intensity = LightIntensity::Low;
        }
        Anger | Tension => {
            p.technique = Some(LightingTechnique::Split);
            p.contrast_ratio = "8:1".to_string();
        }
        Joy | Hope => {
            p.technique = Some(LightingTechnique::HighKey);
            p.contrast_ratio = "2:1".to_string();
            p.intensity = LightIntensity::High;
        }
        Sadness => {
            p.technique = Some(LightingTechnique::LowKey);
            p.contrast_ratio = "8:1".to_string();
            p.intensity = LightIntensity::Low;
        }
        Surprise | Disgust | Melancholy | Euphoria | Anxiety | Nostalgia | Loneliness | Despair
        | Triumph | Confusion | Serenity | Passion => {}
    }
    p
}

/// Clamp to the representable range and round to the nearest 100 K.
fn temperature_bounds(mut p: LightingParameters, _ctx: &RuleContext<'_>) -> LightingParameters {
    let clamped = p
        .temperature_kelvin
        .clamp(MIN_TEMPERATURE_KELVIN, MAX_TEMPERATURE_KELVIN);
    p.temperature_kelvin = round_half_even_hundreds(clamped);
    p
}

/// Exact halves go to the even hundred (3050 -> 3000, 3150 -> 3200).
fn round_half_even_hundreds(kelvin: i32) -> i32 {
    let hundreds = kelvin.div_euclid(100);
    let rest = kelvin.rem_euclid(100);
    let round_up = rest > 50 || (rest == 50 && hundreds % 2 != 0);
    (hundreds + i32::from(round_up)) * 100
}

// Camera

fn emotion_angle(mut p: CameraParameters, ctx: &RuleContext<'_>) -> CameraParameters {
    use EmotionType::*;
    match ctx.emotion {
        Fear => p.vertical_angle = CameraAngleVertical::High,
        Anger | Triumph => p.vertical_angle = CameraAngleVertical::Low,
        Joy | Sadness | Surprise | Disgust | Tension | Melancholy | Euphoria | Anxiety
        | Nostalgia | Loneliness | Hope | Despair | Betrayal | Confusion | Serenity | Dread
        | Passion => {}
    }
    p
}

/// Power balance overrides the emotion-derived angle.
fn power_angle(mut p: CameraParameters, ctx: &RuleContext<'_>) -> CameraParameters {
    if let Some(power) = ctx.power {
        match power.power_balance {
            PowerBalance::Dominant => p.vertical_angle = CameraAngleVertical::Low,
            PowerBalance::Submissive => p.vertical_angle = CameraAngleVertical::High,
            PowerBalance::Equal | PowerBalance::Shifting => {}
        }
    }
    p
}

fn pacing_movement(mut p: CameraParameters, ctx: &RuleContext<'_>) -> CameraParameters {
    if let Some(pacing) = ctx.pacing {
        match pacing.rhythm {
            Rhythm::Fast | Rhythm::VeryFast => {
                p.movement = CameraMovement::Handheld;
                p.movement_speed = Some(Rhythm::Fast);
            }
            Rhythm::Slow | Rhythm::VerySlow => {
                p.movement = CameraMovement::DollyIn;
                p.movement_speed = Some(Rhythm::Slow);
            }
            Rhythm::Medium => {}
        }
    }
    p
}

fn unsettled_handheld(mut p: CameraParameters, ctx: &RuleContext<'_>) -> CameraParameters {
    use EmotionType::*;
    match ctx.emotion {
        Anxiety | Confusion => {
            p.movement = CameraMovement::Handheld;
            p.focal_length_mm = 100;
        }
        Joy | Sadness | Anger | Fear | Surprise | Disgust | Tension | Melancholy | Euphoria
        | Nostalgia | Loneliness | Hope | Despair | Triumph | Betrayal | Serenity | Dread
        | Passion => {}
    }
    p
}

fn shot_framing(mut p: CameraParameters, ctx: &RuleContext<'_>) -> CameraParameters {
    use EmotionType::*;
    match ctx.emotion {
        Loneliness | Despair => {
            p.shot_size = ShotSize::LongShot;
            p.focal_length_mm = 35;
            p.depth_of_field = DepthOfField::Deep;
        }
        Passion | Euphoria => {
            p.shot_size = ShotSize::Closeup;
            p.focal_length_mm = 85;
            p.depth_of_field = DepthOfField::Shallow;
        }
        Joy | Sadness | Anger | Fear | Surprise | Disgust | Tension | Melancholy | Anxiety
        | Nostalgia | Hope | Triumph | Betrayal | Confusion | Serenity | Dread => {}
    }
    p
}
