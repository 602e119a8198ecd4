//! Line patterns for Fountain-style screenplays.
//!
//! All patterns are matched against a trimmed line.

use std::sync::LazyLock;

use regex::Regex;

/// Heading tokens, longest first so `INT./EXT` is not read as `INT`.
const HEADING_TOKENS: &str = r"INT\./EXT|INT/EXT|I/E|INT|EXT|EST";

/// Heading token followed by a separator. Lines matching this are heading
/// candidates even when the full heading pattern rejects them.
static HEADING_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^(?:{HEADING_TOKENS})[.\s]")).unwrap());

/// Full scene heading: token, separator, location, optional `- TIME`.
static SCENE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<token>{HEADING_TOKENS})[.\s](?P<location>.+?)(?:\s*-\s*(?P<time>.+))?$"
    ))
    .unwrap()
});

static CHARACTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z\s.()]+?(?:\s*\^)?$").unwrap());

static TRANSITION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z\s]+TO:$").unwrap());

static CENTERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^>\s*(.+?)\s*<$").unwrap());

static SECTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

static SYNOPSIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^=\s+(.+)$").unwrap());

static PAGE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^={3,}$").unwrap());

static NOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[\[(.+?)\]\]$").unwrap());

static TITLE_PAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z\s]+):\s*(.+)$").unwrap());

/// Decomposed scene heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Upper-cased heading token
    pub interior_exterior: String,
    pub location: String,
    pub time_of_day: Option<String>,
}

pub fn is_heading_candidate(line: &str) -> bool {
    HEADING_PREFIX.is_match(line)
}

pub fn parse_heading(line: &str) -> Option<Heading> {
    let caps = SCENE_HEADING.captures(line)?;
    let location = caps.name("location")?.as_str().trim();
    if location.is_empty() {
        return None;
    }

    Some(Heading {
        interior_exterior: caps["token"].to_uppercase(),
        location: location.to_string(),
        time_of_day: caps
            .name("time")
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty()),
    })
}

pub fn is_heading(line: &str) -> bool {
    parse_heading(line).is_some()
}

/// All-caps line that could name a speaker.
pub fn is_cue_shaped(line: &str) -> bool {
    CHARACTER.is_match(line)
}

pub fn is_transition(line: &str) -> bool {
    TRANSITION.is_match(line)
}

pub fn is_parenthetical(line: &str) -> bool {
    line.starts_with('(') && line.ends_with(')')
}

pub fn centered_text(line: &str) -> Option<&str> {
    CENTERED.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Section depth and title.
pub fn section(line: &str) -> Option<(usize, &str)> {
    let caps = SECTION.captures(line)?;
    let level = caps.get(1)?.as_str().len();
    let title = caps.get(2)?.as_str();
    Some((level, title))
}

pub fn synopsis_text(line: &str) -> Option<&str> {
    SYNOPSIS.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str())
}

pub fn is_page_break(line: &str) -> bool {
    PAGE_BREAK.is_match(line)
}

pub fn note_text(line: &str) -> Option<&str> {
    NOTE.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// `Key: Value` pair of a title page, key lowercased.
pub fn title_page_entry(line: &str) -> Option<(String, String)> {
    let caps = TITLE_PAGE.captures(line)?;
    let key = caps.get(1)?.as_str().trim().to_lowercase();
    let value = caps.get(2)?.as_str().trim().to_string();
    Some((key, value))
}
