//! Screenplay to Scene Intent orchestration.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn, Instrument};

use sis_emotion_client::{ClassifierError, EmotionClassifier, HttpEmotionClassifier};
use sis_models::{
    AnalysisId, Beat, ElementType, EmotionalArc, PacingMetadata, PowerDynamics, Scene,
    SceneIntent, ScriptMetadata, VisualSignals, SCHEMA_VERSION,
};
use sis_screenplay::{ScreenplayError, ScreenplayParser};
use sis_visual::{technical_tags, validate_knowledge_base, KnowledgeBase, VisualMappingEngine};

use crate::aggregation::summarize;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::heuristics::{estimate_duration, estimate_pacing, estimate_power, round_to};
use crate::logging::AnalysisLogger;
use crate::metrics;

/// Key under which the classifier model is reported in `model_versions`.
pub const EMOTION_CLASSIFIER_KEY: &str = "emotion_classifier";

/// A narrative element with its speaker and duration fixed, waiting for
/// classification.
#[derive(Debug, Clone)]
struct PendingBeat {
    element_index: usize,
    element_type: ElementType,
    text: String,
    speaker: Option<String>,
    duration: f64,
}

/// Position of a surviving beat in the scene timeline.
struct BeatTiming {
    number: u32,
    start: f64,
    end: f64,
}

/// A classified and mapped beat that has not been placed yet.
struct AnalyzedBeat {
    pending: PendingBeat,
    arc: EmotionalArc,
    power: Option<PowerDynamics>,
    pacing: PacingMetadata,
    visuals: VisualSignals,
}

/// Speaker and duration pass over one scene.
///
/// The speaker is set by a character cue, seen by the next narrative
/// elements and cleared after each action.
fn plan_beats(scene: &Scene) -> Vec<PendingBeat> {
    let mut pending = Vec::new();
    let mut speaker: Option<String> = None;

    for (idx, element) in scene.elements.iter().enumerate() {
        match element.element_type {
            ElementType::Character => {
                speaker = Some(element.content.clone());
                continue;
            }
            ElementType::Action | ElementType::Dialogue => {}
            _ => continue,
        }

        pending.push(PendingBeat {
            element_index: idx,
            element_type: element.element_type,
            text: element.content.clone(),
            speaker: speaker.clone(),
            duration: estimate_duration(&element.content),
        });

        if element.element_type == ElementType::Action {
            speaker = None;
        }
    }

    pending
}

/// Runs parsing, emotion classification and visual mapping over a script.
pub struct SceneIntentPipeline {
    classifier: Arc<dyn EmotionClassifier>,
    mapper: VisualMappingEngine,
    config: PipelineConfig,
}

impl SceneIntentPipeline {
    pub fn new(
        classifier: Arc<dyn EmotionClassifier>,
        mapper: VisualMappingEngine,
        config: PipelineConfig,
    ) -> Self {
        Self {
            classifier,
            mapper,
            config,
        }
    }

    /// Build a pipeline whose color table is loaded from the configured
    /// knowledge base directory.
    pub fn from_config(config: PipelineConfig, classifier: Arc<dyn EmotionClassifier>) -> Self {
        let knowledge_base = KnowledgeBase::from_dir(&config.knowledge_base_dir);
        let mapper = VisualMappingEngine::new(Arc::new(knowledge_base));
        Self::new(classifier, mapper, config)
    }

    /// Pipeline wired to the HTTP emotion service, configured from the
    /// environment.
    ///
    /// An incomplete knowledge base or an unhealthy service is logged but
    /// does not fail construction.
    pub async fn from_env() -> PipelineResult<Self> {
        let config = PipelineConfig::from_env();
        info!("Pipeline config: {:?}", config);

        let report = validate_knowledge_base(&config.knowledge_base_dir);
        if !report.is_complete() {
            warn!(
                missing = ?report.missing,
                invalid = ?report.invalid,
                "Knowledge base incomplete, colors may fall back to gray"
            );
        }

        let classifier = HttpEmotionClassifier::from_env()?;
        if !classifier.health_check().await.unwrap_or(false) {
            warn!(url = %classifier.config().base_url, "Emotion service is not reporting healthy");
        }

        Ok(Self::from_config(config, Arc::new(classifier)))
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn mapper(&self) -> &VisualMappingEngine {
        &self.mapper
    }

    /// Analyze a script, returning one Scene Intent per scene that produced
    /// at least one beat. The list may be empty.
    pub async fn analyze(&self, text: &str, analysis_id: &AnalysisId) -> Vec<SceneIntent> {
        let logger = AnalysisLogger::new(analysis_id, "scene_intent");
        let span = logger.create_span();

        async {
            let started = Instant::now();
            logger.log_start(&format!("{} bytes of screenplay text", text.len()));

            let mut parser = ScreenplayParser::new();
            let scenes = parser.parse(text);
            let title = parser.title().map(str::to_string);
            logger.log_progress(&format!("parsed {} scenes", scenes.len()));

            let mut results = Vec::with_capacity(scenes.len());
            for scene in &scenes {
                match self
                    .analyze_scene(scene, analysis_id, title.as_deref(), &logger)
                    .await
                {
                    Some(intent) => {
                        metrics::record_scene_analyzed();
                        results.push(intent);
                    }
                    None => {
                        metrics::record_scene_dropped();
                        logger.log_progress(&format!(
                            "scene {} produced no beats, dropping",
                            scene.scene_number
                        ));
                    }
                }
            }

            let elapsed = started.elapsed().as_secs_f64();
            metrics::record_analysis_duration(results.len(), elapsed);
            logger.log_completion(&format!(
                "{} of {} scenes analyzed in {:.2}s",
                results.len(),
                scenes.len(),
                elapsed
            ));

            results
        }
        .instrument(span)
        .await
    }

    /// Like [`analyze`](Self::analyze), but an empty result is an error.
    pub async fn analyze_script(
        &self,
        text: &str,
        analysis_id: &AnalysisId,
    ) -> PipelineResult<Vec<SceneIntent>> {
        let intents = self.analyze(text, analysis_id).await;
        if intents.is_empty() {
            return Err(PipelineError::NoValidScenes);
        }
        Ok(intents)
    }

    /// Read a screenplay file and analyze it.
    pub async fn analyze_file(
        &self,
        path: impl AsRef<Path>,
        analysis_id: &AnalysisId,
    ) -> PipelineResult<Vec<SceneIntent>> {
        let text = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(ScreenplayError::from)?;
        self.analyze_script(&text, analysis_id).await
    }

    /// Analyze one parsed scene; `None` when no beat survives.
    pub async fn analyze_scene(
        &self,
        scene: &Scene,
        analysis_id: &AnalysisId,
        title: Option<&str>,
        logger: &AnalysisLogger,
    ) -> Option<SceneIntent> {
        let started = Instant::now();
        let pending = plan_beats(scene);
        debug!(
            scene = scene.scene_number,
            pending = pending.len(),
            "Planned scene beats"
        );

        let outcomes: Vec<Result<AnalyzedBeat, (PendingBeat, ClassifierError)>> =
            stream::iter(pending)
                .map(|p| self.analyze_beat(p))
                .buffered(self.config.max_concurrent_classifications.max(1))
                .collect()
                .await;

        let mut beats: Vec<Beat> = Vec::new();
        let mut warnings = Vec::new();
        let mut detections = Vec::new();
        // Only surviving beats advance the timeline
        let mut cursor = 0.0;

        for outcome in outcomes {
            let analyzed = match outcome {
                Ok(analyzed) => analyzed,
                Err((p, e)) => {
                    let warning = format!(
                        "Emotion detection failed for {} element {}: {}",
                        p.element_type.as_str(),
                        p.element_index,
                        e
                    );
                    logger.log_warning(&format!(
                        "scene {}: {}, dropping beat",
                        scene.scene_number, warning
                    ));
                    metrics::record_element_dropped(p.element_type.as_str());
                    warnings.push(warning);
                    continue;
                }
            };

            let timing = BeatTiming {
                number: beats.len() as u32 + 1,
                start: round_to(cursor, 2),
                end: round_to(cursor + analyzed.pending.duration, 2),
            };
            cursor += analyzed.pending.duration;

            detections.push(analyzed.arc.primary_emotion.clone());
            beats.push(self.assemble_beat(analyzed, timing, scene, analysis_id));
        }

        if beats.is_empty() {
            return None;
        }

        metrics::record_beats_emitted(beats.len());
        let summary = summarize(&detections, scene.scene_number, &self.mapper);

        let mut characters_present: Vec<String> = Vec::new();
        for c in beats.iter().flat_map(|b| b.characters.iter()) {
            if !characters_present.contains(c) {
                characters_present.push(c.clone());
            }
        }

        let mut model_versions = HashMap::new();
        model_versions.insert(
            EMOTION_CLASSIFIER_KEY.to_string(),
            self.classifier.model_name().to_string(),
        );

        Some(SceneIntent {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            analysis_id: analysis_id.clone(),
            script_metadata: ScriptMetadata {
                title: title.map(str::to_string),
                scene_number: scene.scene_number,
                location: scene.location.clone(),
                time_of_day: scene.time_of_day.clone(),
                characters_present,
                page_number: None,
                estimated_duration_seconds: round_to(cursor, 2),
            },
            beats,
            scene_dominant_emotion: summary.dominant_emotion,
            scene_emotional_range: summary.emotional_range,
            scene_intensity_average: summary.intensity_average,
            scene_visual_summary: summary.visual_summary,
            processing_time_seconds: Some(round_to(started.elapsed().as_secs_f64(), 3)),
            model_versions,
            warnings,
        })
    }

    async fn analyze_beat(
        &self,
        pending: PendingBeat,
    ) -> Result<AnalyzedBeat, (PendingBeat, ClassifierError)> {
        let arc = match self.classifier.analyze(&pending.text).await {
            Ok(arc) => arc,
            Err(e) => return Err((pending, e)),
        };

        let pacing = estimate_pacing(&pending.text, pending.duration);
        let power = estimate_power(pending.speaker.as_deref(), arc.emotion());
        let visuals = self.mapper.map(&arc, power.as_ref(), Some(&pacing));

        Ok(AnalyzedBeat {
            pending,
            arc,
            power,
            pacing,
            visuals,
        })
    }

    fn assemble_beat(
        &self,
        analyzed: AnalyzedBeat,
        timing: BeatTiming,
        scene: &Scene,
        analysis_id: &AnalysisId,
    ) -> Beat {
        let AnalyzedBeat {
            pending,
            arc,
            power,
            pacing,
            visuals,
        } = analyzed;

        let is_dialogue = pending.element_type == ElementType::Dialogue;
        let characters = match (&pending.speaker, is_dialogue) {
            (Some(speaker), true) => vec![speaker.clone()],
            _ => Vec::new(),
        };
        let (dialogue, action) = if is_dialogue {
            (vec![pending.text], Vec::new())
        } else {
            (Vec::new(), vec![pending.text])
        };

        Beat {
            beat_id: format!(
                "{}-{}-{}",
                analysis_id, scene.scene_number, pending.element_index
            ),
            beat_number: timing.number,
            timestamp_start: timing.start,
            timestamp_end: timing.end,
            dialogue,
            action,
            characters,
            emotional_arc: arc,
            power_dynamics: power,
            pacing,
            technical_tags: technical_tags(&visuals),
            visual_signals: visuals,
        }
    }
}
