//! Parsed screenplay structure.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fallback time of day for headings without a `- TIME` suffix.
pub const UNKNOWN_TIME_OF_DAY: &str = "UNKNOWN";

/// Kind of a classified screenplay line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    SceneHeading,
    Action,
    Character,
    Dialogue,
    Parenthetical,
    Transition,
    Centered,
    PageBreak,
    Section,
    Synopsis,
    Note,
    TitlePage,
}

impl ElementType {
    pub const ALL: &'static [ElementType] = &[
        ElementType::SceneHeading,
        ElementType::Action,
        ElementType::Character,
        ElementType::Dialogue,
        ElementType::Parenthetical,
        ElementType::Transition,
        ElementType::Centered,
        ElementType::PageBreak,
        ElementType::Section,
        ElementType::Synopsis,
        ElementType::Note,
        ElementType::TitlePage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::SceneHeading => "scene_heading",
            ElementType::Action => "action",
            ElementType::Character => "character",
            ElementType::Dialogue => "dialogue",
            ElementType::Parenthetical => "parenthetical",
            ElementType::Transition => "transition",
            ElementType::Centered => "centered",
            ElementType::PageBreak => "page_break",
            ElementType::Section => "section",
            ElementType::Synopsis => "synopsis",
            ElementType::Note => "note",
            ElementType::TitlePage => "title_page",
        }
    }

    /// Whether this element produces a timed beat.
    pub fn is_narrative(&self) -> bool {
        matches!(self, ElementType::Action | ElementType::Dialogue)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = ElementTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ElementType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| ElementTypeParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown element type: {0}")]
pub struct ElementTypeParseError(String);

/// One classified line within a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Element {
    pub element_type: ElementType,
    pub content: String,
    /// 0-based index into the input lines
    pub line_number: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl Element {
    pub fn new(element_type: ElementType, content: impl Into<String>, line_number: usize) -> Self {
        Self {
            element_type,
            content: content.into(),
            line_number,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }

    /// Section depth, for `section` elements.
    pub fn section_level(&self) -> Option<u64> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("level"))
            .and_then(|v| v.as_u64())
    }
}

/// A spoken line attributed to its speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DialogueLine {
    pub character: String,
    pub text: String,
}

/// A screenplay scene starting at a heading line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// 1-based position in the parser output
    pub scene_number: u32,
    pub heading: String,
    pub location: String,
    pub time_of_day: String,
    /// Upper-cased heading token (INT, EXT, EST, INT./EXT, INT/EXT, I/E)
    pub interior_exterior: String,
    pub elements: Vec<Element>,
    /// Line index of the heading
    pub start_line: usize,
    /// One past the last line of the scene
    pub end_line: usize,
}

impl Scene {
    /// Dialogue lines paired with the character cue that precedes them.
    ///
    /// Only the first dialogue element after a cue (parentheticals skipped)
    /// is attributed to it.
    pub fn dialogue(&self) -> Vec<DialogueLine> {
        let mut speaker: Option<&str> = None;
        let mut lines = Vec::new();

        for element in &self.elements {
            match element.element_type {
                ElementType::Character => speaker = Some(element.content.as_str()),
                ElementType::Parenthetical => {}
                ElementType::Dialogue => {
                    if let Some(character) = speaker.take() {
                        lines.push(DialogueLine {
                            character: character.to_string(),
                            text: element.content.clone(),
                        });
                    }
                }
                _ => speaker = None,
            }
        }

        lines
    }

    /// Contents of every action element, in order.
    pub fn action_lines(&self) -> Vec<&str> {
        self.elements_of(ElementType::Action)
            .map(|e| e.content.as_str())
            .collect()
    }

    /// Distinct character cues in order of first appearance.
    pub fn characters(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for element in self.elements_of(ElementType::Character) {
            if !seen.contains(&element.content) {
                seen.push(element.content.clone());
            }
        }
        seen
    }

    pub fn elements_of(&self, element_type: ElementType) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(move |e| e.element_type == element_type)
    }
}
