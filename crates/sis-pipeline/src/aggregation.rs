//! Scene-level emotion aggregation.

use sis_models::{EmotionCategory, EmotionDetection, EmotionType, EmotionalArc, VisualSignals};
use sis_visual::VisualMappingEngine;

/// Scene-wide summary of per-beat primary emotions.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEmotionSummary {
    pub dominant_emotion: EmotionType,
    pub emotional_range: Vec<EmotionType>,
    pub intensity_average: u8,
    pub visual_summary: VisualSignals,
}

/// Highest-intensity detection; the earliest one wins a tie.
pub fn dominant_detection(detections: &[EmotionDetection]) -> Option<&EmotionDetection> {
    detections.iter().fold(None, |best, d| match best {
        Some(b) if b.intensity >= d.intensity => Some(b),
        _ => Some(d),
    })
}

/// Distinct emotions in order of first appearance.
pub fn emotional_range(detections: &[EmotionDetection]) -> Vec<EmotionType> {
    let mut range = Vec::new();
    for d in detections {
        if !range.contains(&d.emotion) {
            range.push(d.emotion);
        }
    }
    range
}

/// Floor of the mean intensity, 0 for no detections.
pub fn intensity_average(detections: &[EmotionDetection]) -> u8 {
    if detections.is_empty() {
        return 0;
    }
    let total: u32 = detections.iter().map(|d| d.intensity as u32).sum();
    (total / detections.len() as u32) as u8
}

pub fn summarize(
    detections: &[EmotionDetection],
    scene_number: u32,
    mapper: &VisualMappingEngine,
) -> SceneEmotionSummary {
    let dominant = dominant_detection(detections);
    let average = intensity_average(detections);

    let (emotion, category, confidence) = match dominant {
        Some(d) => (d.emotion, d.category, d.confidence),
        None => (EmotionType::Serenity, EmotionCategory::Primary, 0.0),
    };

    // Built by hand so the category follows the dominant detection
    let mut arc = EmotionalArc::single(EmotionDetection {
        emotion,
        category,
        confidence,
        intensity: average,
    });
    arc.scene_id = Some(scene_number.to_string());
    arc.segment_id = Some("summary".to_string());

    SceneEmotionSummary {
        dominant_emotion: emotion,
        emotional_range: emotional_range(detections),
        intensity_average: average,
        visual_summary: mapper.map(&arc, None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sis_models::{CameraAngleVertical, LightingTechnique};

    fn detection(emotion: EmotionType, intensity: u8) -> EmotionDetection {
        EmotionDetection::new(emotion, 0.8, intensity)
    }

    #[test]
    fn test_dominant_first_occurrence_wins() {
        let detections = vec![
            detection(EmotionType::Joy, 40),
            detection(EmotionType::Anger, 70),
            detection(EmotionType::Fear, 70),
        ];
        assert_eq!(
            dominant_detection(&detections).unwrap().emotion,
            EmotionType::Anger
        );
        assert!(dominant_detection(&[]).is_none());
    }

    #[test]
    fn test_range_keeps_first_appearance_order() {
        let detections = vec![
            detection(EmotionType::Fear, 10),
            detection(EmotionType::Joy, 20),
            detection(EmotionType::Fear, 30),
        ];
        assert_eq!(
            emotional_range(&detections),
            vec![EmotionType::Fear, EmotionType::Joy]
        );
    }

    #[test]
    fn test_intensity_average_floors() {
        let detections = vec![detection(EmotionType::Joy, 50), detection(EmotionType::Joy, 51)];
        assert_eq!(intensity_average(&detections), 50);
        assert_eq!(intensity_average(&[]), 0);
    }

    #[test]
    fn test_summary_maps_dominant_at_average_intensity() {
        let detections = vec![detection(EmotionType::Fear, 90), detection(EmotionType::Joy, 10)];
        let mapper = VisualMappingEngine::without_knowledge_base();
        let summary = summarize(&detections, 3, &mapper);

        assert_eq!(summary.dominant_emotion, EmotionType::Fear);
        assert_eq!(summary.intensity_average, 50);
        assert_eq!(summary.visual_summary.confidence_score, 0.8);
        assert_eq!(
            summary.visual_summary.lighting.technique,
            Some(LightingTechnique::Chiaroscuro)
        );
        // No power or pacing: the fear angle rule alone decides
        assert_eq!(
            summary.visual_summary.camera.vertical_angle,
            CameraAngleVertical::High
        );
    }

    #[test]
    fn test_summary_without_detections() {
        let mapper = VisualMappingEngine::without_knowledge_base();
        let summary = summarize(&[], 1, &mapper);
        assert_eq!(summary.dominant_emotion, EmotionType::Serenity);
        assert_eq!(summary.intensity_average, 0);
        assert!(summary.emotional_range.is_empty());
    }
}
