//! Emotion to cinematography mapping.

use std::sync::Arc;

use sis_models::{
    CameraParameters, ColorPalette, EmotionType, EmotionalArc, HarmonyType, LightingParameters,
    PacingMetadata, PowerDynamics, VisualSignals,
};

use crate::knowledge_base::{ColorEntry, KnowledgeBase, FALLBACK_PRIMARY};
use crate::rules::{apply_rules, RuleContext, CAMERA_RULES, LIGHTING_RULES};

/// Maps an emotional state to color, lighting and camera recommendations.
///
/// Mapping is pure: the same arc, power and pacing always give the same
/// signals. The knowledge base is shared read-only.
#[derive(Debug, Clone)]
pub struct VisualMappingEngine {
    knowledge_base: Arc<KnowledgeBase>,
}

impl VisualMappingEngine {
    pub fn new(knowledge_base: Arc<KnowledgeBase>) -> Self {
        Self { knowledge_base }
    }

    /// Engine with no color table; every emotion gets the gray palette.
    pub fn without_knowledge_base() -> Self {
        Self::new(Arc::new(KnowledgeBase::empty()))
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.knowledge_base
    }

    pub fn map(
        &self,
        arc: &EmotionalArc,
        power: Option<&PowerDynamics>,
        pacing: Option<&PacingMetadata>,
    ) -> VisualSignals {
        let emotion = arc.primary_emotion.emotion;
        let intensity = arc.primary_emotion.intensity;
        let ctx = RuleContext {
            emotion,
            intensity,
            power,
            pacing,
        };

        let entry = self.knowledge_base.get(emotion);
        let colors = color_palette(entry, emotion, intensity);
        let lighting = apply_rules(LIGHTING_RULES, LightingParameters::default(), &ctx);
        let camera = apply_rules(CAMERA_RULES, CameraParameters::default(), &ctx);
        let reasoning = reasoning(arc, &colors, &lighting, &camera);

        VisualSignals {
            colors,
            lighting,
            camera,
            reasoning,
            confidence_score: arc.primary_emotion.confidence,
            film_references: entry.map(|e| e.film_references.clone()).unwrap_or_default(),
            alternative_options: None,
        }
    }
}

fn color_palette(entry: Option<&ColorEntry>, emotion: EmotionType, intensity: u8) -> ColorPalette {
    let fallback;
    let entry = match entry {
        Some(e) => e,
        None => {
            fallback = ColorEntry::fallback();
            &fallback
        }
    };

    // Strong sadness reads as dim and washed out
    let level = match emotion {
        EmotionType::Sadness | EmotionType::Despair => 100u8.saturating_sub(intensity).max(10),
        _ => intensity,
    };

    ColorPalette {
        primary_colors: entry.primary.clone(),
        secondary_colors: entry.secondary.clone(),
        accent_colors: entry.accent.clone(),
        saturation: level,
        brightness: level,
        harmony_type: Some(HarmonyType::Analogous),
    }
}

fn reasoning(
    arc: &EmotionalArc,
    colors: &ColorPalette,
    lighting: &LightingParameters,
    camera: &CameraParameters,
) -> String {
    let primary = colors
        .primary_colors
        .first()
        .map(String::as_str)
        .unwrap_or(FALLBACK_PRIMARY);

    format!(
        "Based on the primary emotion of {} (intensity: {}%), we recommend a {} lighting setup \
         to enhance the mood. The color palette uses {} to evoke the psychological state. \
         Camera is positioned {} to reflect character power dynamics.",
        arc.primary_emotion.emotion,
        arc.primary_emotion.intensity,
        lighting.technique_or_default(),
        primary,
        camera.vertical_angle,
    )
}

/// Short production tags summarizing a recommendation.
pub fn technical_tags(signals: &VisualSignals) -> Vec<String> {
    vec![
        format!("lighting:{}", signals.lighting.technique_or_default()),
        format!("movement:{}", signals.camera.movement),
        format!("shot:{}", signals.camera.shot_size),
        format!("angle:{}", signals.camera.vertical_angle),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sis_models::{
        CameraAngleVertical, EmotionDetection, LightingTechnique, PowerBalance, Rhythm,
    };

    fn arc(emotion: EmotionType, intensity: u8) -> EmotionalArc {
        EmotionalArc::single(EmotionDetection::new(emotion, 0.8, intensity))
    }

    fn engine() -> VisualMappingEngine {
        let kb = KnowledgeBase::from_json_str(
            r##"{"emotions": [
                {"emotion": "fear", "palette": ["#1B1B2F", "#162447", "#E43F5A"],
                 "film_references": ["The Shining (1980)"]},
                {"emotion": "sadness", "color_palette": {"primary": ["#4A6FA5"], "secondary": ["#2E4057"], "accent": ["#8FA9C4"]}}
            ]}"##,
        )
        .unwrap();
        VisualMappingEngine::new(Arc::new(kb))
    }

    #[test]
    fn test_fear_scenario() {
        let signals = engine().map(&arc(EmotionType::Fear, 90), None, None);
        assert_eq!(signals.lighting.technique, Some(LightingTechnique::Chiaroscuro));
        assert_eq!(signals.camera.vertical_angle, CameraAngleVertical::High);
        assert!(signals.lighting.temperature_kelvin > 5000);
        assert_eq!(signals.colors.primary_colors, vec!["#1B1B2F"]);
        assert_eq!(signals.film_references, vec!["The Shining (1980)"]);
        assert_eq!(signals.confidence_score, 0.8);
    }

    #[test]
    fn test_anger_submissive_is_high_angle() {
        let power = PowerDynamics::new(PowerBalance::Submissive, 30);
        let signals = engine().map(&arc(EmotionType::Anger, 70), Some(&power), None);
        assert_eq!(signals.camera.vertical_angle, CameraAngleVertical::High);
    }

    #[test]
    fn test_missing_emotion_uses_gray() {
        let signals = engine().map(&arc(EmotionType::Joy, 60), None, None);
        assert_eq!(signals.colors.primary_colors, vec!["#808080"]);
        assert_eq!(signals.colors.secondary_colors, vec!["#A9A9A9"]);
        assert_eq!(signals.colors.accent_colors, vec!["#D3D3D3"]);
        assert_eq!(signals.colors.saturation, 60);
        assert_eq!(signals.colors.brightness, 60);
        assert!(signals.film_references.is_empty());

        let signals = VisualMappingEngine::without_knowledge_base().map(&arc(EmotionType::Fear, 60), None, None);
        assert_eq!(signals.colors.primary_colors, vec!["#808080"]);
    }

    #[test]
    fn test_sadness_inverts_levels() {
        let signals = engine().map(&arc(EmotionType::Sadness, 70), None, None);
        assert_eq!(signals.colors.saturation, 30);
        assert_eq!(signals.colors.brightness, 30);
        assert_eq!(signals.colors.primary_colors, vec!["#4A6FA5"]);

        let signals = engine().map(&arc(EmotionType::Despair, 95), None, None);
        assert_eq!(signals.colors.saturation, 10);
        assert_eq!(signals.colors.harmony_type, Some(HarmonyType::Analogous));
    }

    #[test]
    fn test_map_is_deterministic() {
        let engine = engine();
        let power = PowerDynamics::new(PowerBalance::Dominant, 80).with_dominant_character("JOHN");
        let pacing = PacingMetadata::new(60, Rhythm::Slow, 4.5, 0.2);
        let a = arc(EmotionType::Triumph, 75);

        let first = engine.map(&a, Some(&power), Some(&pacing));
        let second = engine.map(&a, Some(&power), Some(&pacing));
        assert_eq!(first, second);
    }

    #[test]
    fn test_reasoning_and_tags() {
        let signals = engine().map(&arc(EmotionType::Fear, 90), None, None);
        assert_eq!(
            signals.reasoning,
            "Based on the primary emotion of fear (intensity: 90%), we recommend a chiaroscuro \
             lighting setup to enhance the mood. The color palette uses #1B1B2F to evoke the \
             psychological state. Camera is positioned high to reflect character power dynamics."
        );
        assert_eq!(
            technical_tags(&signals),
            vec!["lighting:chiaroscuro", "movement:static", "shot:medium_shot", "angle:high"]
        );
    }

    #[test]
    fn test_neutral_arc_maps_to_baseline() {
        let signals = engine().map(&EmotionalArc::neutral(), None, None);
        assert_eq!(signals.lighting, LightingParameters::default());
        assert_eq!(signals.camera, CameraParameters::default());
        assert_eq!(signals.confidence_score, 0.0);
    }
}
