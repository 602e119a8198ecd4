//! Checks against the knowledge base shipped with the workspace.

use std::path::PathBuf;
use std::sync::Arc;

use sis_models::{EmotionDetection, EmotionType, EmotionalArc};
use sis_visual::{validate_knowledge_base, KnowledgeBase, VisualMappingEngine};

fn knowledge_base_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../knowledge-base")
}

#[test]
fn test_bundled_knowledge_base_is_complete() {
    let report = validate_knowledge_base(knowledge_base_dir());
    assert!(report.is_complete(), "{report:?}");
    assert_eq!(report.valid.len(), 4);
}

#[test]
fn test_bundled_color_map_covers_taxonomy() {
    let kb = KnowledgeBase::from_dir(knowledge_base_dir());
    for emotion in EmotionType::ALL {
        let entry = kb.get(*emotion);
        assert!(entry.is_some(), "no color entry for {emotion}");
        assert!(!entry.unwrap().primary.is_empty());
    }
}

#[test]
fn test_every_emotion_maps() {
    let engine = VisualMappingEngine::new(Arc::new(KnowledgeBase::from_dir(knowledge_base_dir())));
    for emotion in EmotionType::ALL {
        let arc = EmotionalArc::single(EmotionDetection::new(*emotion, 0.9, 75));
        let signals = engine.map(&arc, None, None);

        assert_ne!(signals.colors.primary_colors, vec!["#808080"], "{emotion} fell back to gray");
        assert!((1800..=10000).contains(&signals.lighting.temperature_kelvin));
        assert_eq!(signals.lighting.temperature_kelvin % 100, 0);
        assert!(signals.reasoning.contains(emotion.as_str()));
    }
}
