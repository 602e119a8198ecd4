//! Emotion to color knowledge base.
//!
//! The color map is a JSON document of the form:
//!
//! ```json
//! {"emotions": [
//!   {"emotion": "joy", "color_palette": {"primary": ["#FFD700"], "secondary": [...], "accent": [...]}},
//!   {"emotion": "fear", "palette": ["#1B1B2F", "#162447", "#E43F5A"]}
//! ]}
//! ```
//!
//! Entries may carry `film_references`. Entries that fail to parse are
//! skipped with a warning; they never fail the whole load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sis_models::EmotionType;
use tracing::{error, info, warn};

use crate::error::{KnowledgeBaseError, KnowledgeBaseResult};

pub const EMOTION_COLOR_MAP_FILE: &str = "emotion_color_map.json";
pub const CINEMATOGRAPHY_RULES_FILE: &str = "cinematography_rules.json";
pub const LIGHTING_TECHNIQUES_FILE: &str = "lighting_techniques.json";
pub const CAMERA_ANGLE_PSYCHOLOGY_FILE: &str = "camera_angle_psychology.json";

/// Files a complete knowledge base directory provides, by name.
pub const REQUIRED_FILES: &[(&str, &str)] = &[
    ("emotion_color_map", EMOTION_COLOR_MAP_FILE),
    ("cinematography_rules", CINEMATOGRAPHY_RULES_FILE),
    ("lighting_techniques", LIGHTING_TECHNIQUES_FILE),
    ("camera_angle_psychology", CAMERA_ANGLE_PSYCHOLOGY_FILE),
];

pub const FALLBACK_PRIMARY: &str = "#808080";
pub const FALLBACK_SECONDARY: &str = "#A9A9A9";
pub const FALLBACK_ACCENT: &str = "#D3D3D3";

/// Color scheme and references for one emotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub accent: Vec<String>,
    pub film_references: Vec<String>,
}

impl ColorEntry {
    /// Neutral gray triple used when an emotion has no entry.
    pub fn fallback() -> Self {
        Self {
            primary: vec![FALLBACK_PRIMARY.to_string()],
            secondary: vec![FALLBACK_SECONDARY.to_string()],
            accent: vec![FALLBACK_ACCENT.to_string()],
            film_references: Vec::new(),
        }
    }

    /// Spread a flat color list: first is primary, second is secondary,
    /// the rest are accents. Missing slots take the gray fallback.
    fn from_flat(colors: Vec<String>, film_references: Vec<String>) -> Self {
        let mut colors = colors.into_iter();
        let primary = colors.next().unwrap_or_else(|| FALLBACK_PRIMARY.to_string());
        let secondary = colors.next().unwrap_or_else(|| FALLBACK_SECONDARY.to_string());
        let mut accent: Vec<String> = colors.collect();
        if accent.is_empty() {
            accent.push(FALLBACK_ACCENT.to_string());
        }

        Self {
            primary: vec![primary],
            secondary: vec![secondary],
            accent,
            film_references,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawColorMap {
    emotions: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    emotion: String,
    #[serde(default)]
    palette: Option<Vec<String>>,
    #[serde(default)]
    color_palette: Option<RawPalette>,
    #[serde(default)]
    film_references: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawPalette {
    primary: Vec<String>,
    #[serde(default)]
    secondary: Vec<String>,
    #[serde(default)]
    accent: Vec<String>,
}

impl RawEntry {
    fn into_entry(self) -> Result<(String, ColorEntry), String> {
        let key = self.emotion.trim().to_lowercase();
        if key.is_empty() {
            return Err("empty emotion name".to_string());
        }

        let entry = match (self.palette, self.color_palette) {
            (Some(flat), _) if !flat.is_empty() => ColorEntry::from_flat(flat, self.film_references),
            (_, Some(palette)) => {
                if palette.primary.is_empty() {
                    return Err(format!("{key}: color_palette has no primary colors"));
                }
                ColorEntry {
                    primary: palette.primary,
                    secondary: palette.secondary,
                    accent: palette.accent,
                    film_references: self.film_references,
                }
            }
            _ => ColorEntry {
                film_references: self.film_references,
                ..ColorEntry::fallback()
            },
        };

        Ok((key, entry))
    }
}

/// Read-only emotion color table, loaded once and shared.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    colors: HashMap<String, ColorEntry>,
}

impl KnowledgeBase {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a color map document.
    pub fn from_json_str(json: &str) -> KnowledgeBaseResult<Self> {
        let raw: RawColorMap = serde_json::from_str(json)?;
        let mut colors = HashMap::with_capacity(raw.emotions.len());

        for (idx, value) in raw.emotions.into_iter().enumerate() {
            let parsed = serde_json::from_value::<RawEntry>(value)
                .map_err(|e| e.to_string())
                .and_then(RawEntry::into_entry);

            match parsed {
                Ok((key, entry)) => {
                    if key.parse::<EmotionType>().is_err() {
                        warn!(emotion = %key, "Color entry for emotion outside the taxonomy");
                    }
                    colors.insert(key, entry);
                }
                Err(e) => {
                    warn!(index = idx, error = %e, "Skipping unparseable color entry");
                }
            }
        }

        Ok(Self { colors })
    }

    /// Load a color map file.
    pub fn load(path: impl AsRef<Path>) -> KnowledgeBaseResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| KnowledgeBaseError::io(path, e))?;
        let kb = Self::from_json_str(&content)?;

        info!(path = %path.display(), emotions = kb.len(), "Loaded emotion color map");
        Ok(kb)
    }

    /// Load a color map file, falling back to an empty table on any error.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(kb) => kb,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to load emotion color map, using gray fallback");
                Self::empty()
            }
        }
    }

    /// Load the color map from a knowledge base directory.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self::load_or_empty(dir.as_ref().join(EMOTION_COLOR_MAP_FILE))
    }

    pub fn get(&self, emotion: EmotionType) -> Option<&ColorEntry> {
        self.colors.get(emotion.as_str())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Outcome of [`validate_knowledge_base`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeBaseReport {
    /// Files that exist and parse as JSON
    pub valid: Vec<String>,
    pub missing: Vec<(String, PathBuf)>,
    /// Files that exist but failed to load, with the error
    pub invalid: Vec<(String, String)>,
}

impl KnowledgeBaseReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

/// Check that every knowledge base file exists and holds valid JSON.
///
/// Problems are logged as warnings and collected in the report; this
/// never fails.
pub fn validate_knowledge_base(dir: impl AsRef<Path>) -> KnowledgeBaseReport {
    let dir = dir.as_ref();
    let mut report = KnowledgeBaseReport::default();

    for (name, file) in REQUIRED_FILES {
        let path = dir.join(file);
        if !path.exists() {
            report.missing.push((name.to_string(), path));
            continue;
        }

        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| KnowledgeBaseError::io(&path, e))
            .and_then(|s| serde_json::from_str::<serde_json::Value>(&s).map_err(Into::into));

        match loaded {
            Ok(_) => report.valid.push(name.to_string()),
            Err(e) => {
                warn!(file = name, path = %path.display(), error = %e, "Knowledge base file failed to load");
                report.invalid.push((name.to_string(), e.to_string()));
            }
        }
    }

    if report.missing.is_empty() {
        info!(files = REQUIRED_FILES.len(), "Knowledge base validated");
    } else {
        let missing = report
            .missing
            .iter()
            .map(|(n, p)| format!("{} ({})", n, p.display()))
            .collect::<Vec<_>>()
            .join(", ");
        warn!(missing = %missing, "Missing knowledge base files");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLOR_MAP: &str = r##"{
        "emotions": [
            {"emotion": "Joy", "color_palette": {"primary": ["#FFD700"], "secondary": ["#FFA500"], "accent": ["#FF6347"]},
             "film_references": ["Amelie (2001)"]},
            {"emotion": "fear", "palette": ["#1B1B2F", "#162447", "#E43F5A", "#000000"]},
            {"emotion": "hope", "palette": ["#87CEEB"]},
            {"emotion": "dread"},
            {"palette": ["#FFFFFF"]},
            {"emotion": "anger", "color_palette": {"primary": []}},
            "not an object"
        ]
    }"##;

    #[test]
    fn test_parse_entries() {
        let kb = KnowledgeBase::from_json_str(COLOR_MAP).unwrap();
        assert_eq!(kb.len(), 4);

        let joy = kb.get(EmotionType::Joy).unwrap();
        assert_eq!(joy.primary, vec!["#FFD700"]);
        assert_eq!(joy.film_references, vec!["Amelie (2001)"]);

        let fear = kb.get(EmotionType::Fear).unwrap();
        assert_eq!(fear.primary, vec!["#1B1B2F"]);
        assert_eq!(fear.secondary, vec!["#162447"]);
        assert_eq!(fear.accent, vec!["#E43F5A", "#000000"]);

        let hope = kb.get(EmotionType::Hope).unwrap();
        assert_eq!(hope.secondary, vec![FALLBACK_SECONDARY]);
        assert_eq!(hope.accent, vec![FALLBACK_ACCENT]);

        let dread = kb.get(EmotionType::Dread).unwrap();
        assert_eq!(dread.primary, vec![FALLBACK_PRIMARY]);

        assert!(kb.get(EmotionType::Anger).is_none());
        assert!(kb.get(EmotionType::Sadness).is_none());
    }

    #[test]
    fn test_invalid_document() {
        assert!(KnowledgeBase::from_json_str("{}").is_err());
        assert!(KnowledgeBase::from_json_str("not json").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = KnowledgeBase::load(dir.path().join("nope.json")).unwrap_err();
        assert!(err.is_missing());

        let kb = KnowledgeBase::load_or_empty(dir.path().join("nope.json"));
        assert!(kb.is_empty());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(EMOTION_COLOR_MAP_FILE), COLOR_MAP).unwrap();

        let kb = KnowledgeBase::from_dir(dir.path());
        assert_eq!(kb.len(), 4);
    }

    #[test]
    fn test_validate_report() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(EMOTION_COLOR_MAP_FILE), COLOR_MAP).unwrap();
        std::fs::write(dir.path().join(LIGHTING_TECHNIQUES_FILE), "{broken").unwrap();

        let report = validate_knowledge_base(dir.path());
        assert_eq!(report.valid, vec!["emotion_color_map"]);
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(report.invalid[0].0, "lighting_techniques");
        assert_eq!(report.missing.len(), 2);
        assert!(!report.is_complete());
    }
}
