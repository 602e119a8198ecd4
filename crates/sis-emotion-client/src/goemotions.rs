//! Mapping of GoEmotions label scores onto the emotion taxonomy.

use sis_models::{EmotionDetection, EmotionType, EmotionalArc};
use tracing::debug;

use crate::types::LabelScore;

/// Default minimum score for a detection to be kept.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.3;

/// Taxonomy emotion for a GoEmotions label. `neutral` maps to nothing.
pub fn map_label(label: &str) -> Option<EmotionType> {
    let emotion = match label {
        "admiration" => EmotionType::Serenity,
        "amusement" => EmotionType::Joy,
        "anger" => EmotionType::Anger,
        "annoyance" => EmotionType::Anger,
        "approval" => EmotionType::Serenity,
        "caring" => EmotionType::Serenity,
        "confusion" => EmotionType::Confusion,
        "curiosity" => EmotionType::Tension,
        "desire" => EmotionType::Passion,
        "disappointment" => EmotionType::Sadness,
        "disapproval" => EmotionType::Disgust,
        "disgust" => EmotionType::Disgust,
        "embarrassment" => EmotionType::Anxiety,
        "excitement" => EmotionType::Euphoria,
        "fear" => EmotionType::Fear,
        "gratitude" => EmotionType::Joy,
        "grief" => EmotionType::Despair,
        "joy" => EmotionType::Joy,
        "love" => EmotionType::Passion,
        "nervousness" => EmotionType::Anxiety,
        "optimism" => EmotionType::Hope,
        "pride" => EmotionType::Triumph,
        "realization" => EmotionType::Surprise,
        "relief" => EmotionType::Serenity,
        "remorse" => EmotionType::Sadness,
        "sadness" => EmotionType::Sadness,
        "surprise" => EmotionType::Surprise,
        _ => return None,
    };
    Some(emotion)
}

/// Turns raw label scores into an [`EmotionalArc`].
#[derive(Debug, Clone, Copy)]
pub struct GoEmotionsMapper {
    threshold: f64,
}

impl Default for GoEmotionsMapper {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl GoEmotionsMapper {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Build an arc from label scores.
    ///
    /// Scores of labels mapping to the same emotion are summed. Emotions at
    /// or above the threshold become detections, strongest first; when none
    /// qualify the single strongest emotion is kept. No mappable score gives
    /// the neutral arc.
    pub fn to_arc(&self, scores: &[LabelScore]) -> EmotionalArc {
        // Summed per emotion, in first-seen order
        let mut totals: Vec<(EmotionType, f64)> = Vec::new();
        for LabelScore { label, score } in scores {
            let Some(emotion) = map_label(label) else {
                if label != "neutral" {
                    debug!(label = %label, "Ignoring unknown emotion label");
                }
                continue;
            };
            match totals.iter_mut().find(|(e, _)| *e == emotion) {
                Some((_, total)) => *total += score,
                None => totals.push((emotion, *score)),
            }
        }

        let mut selected: Vec<(EmotionType, f64)> = totals
            .iter()
            .copied()
            .filter(|(_, score)| *score >= self.threshold)
            .collect();

        if selected.is_empty() {
            let top = totals
                .iter()
                .copied()
                .fold(None, |best: Option<(EmotionType, f64)>, item| match best {
                    Some(b) if b.1 >= item.1 => Some(b),
                    _ => Some(item),
                });
            selected.extend(top);
        }

        // Stable: equal scores keep first-seen order
        selected.sort_by(|a, b| b.1.total_cmp(&a.1));

        let detections: Vec<EmotionDetection> = selected
            .into_iter()
            .map(|(emotion, score)| {
                let intensity = (score * 100.0).clamp(0.0, 100.0) as u8;
                EmotionDetection::new(emotion, score.min(1.0), intensity)
            })
            .collect();

        let total_confidence: f64 = detections.iter().map(|d| d.confidence).sum();
        if detections.is_empty() || total_confidence <= 0.0 {
            return EmotionalArc::neutral();
        }

        let overall_intensity = match detections.as_slice() {
            [only] => only.intensity,
            _ => {
                let weighted: f64 = detections
                    .iter()
                    .map(|d| d.intensity as f64 * d.confidence)
                    .sum();
                (weighted / total_confidence).clamp(0.0, 100.0) as u8
            }
        };

        let mut detections = detections.into_iter();
        let Some(primary) = detections.next() else {
            return EmotionalArc::neutral();
        };
        let secondary: Vec<EmotionDetection> = detections.collect();

        EmotionalArc {
            scene_id: None,
            segment_id: None,
            primary_emotion: primary,
            mixed_emotions: !secondary.is_empty(),
            secondary_emotions: secondary,
            emotional_shift: Some(false),
            overall_intensity,
        }
    }
}
