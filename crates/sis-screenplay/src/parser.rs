//! Line-oriented screenplay parser.

use std::collections::HashMap;
use std::path::Path;

use sis_models::{Element, ElementType, Scene, UNKNOWN_TIME_OF_DAY};
use tracing::debug;

use crate::error::ScreenplayResult;
use crate::patterns;

/// Parses Fountain-style screenplay text into scenes.
///
/// The parser keeps the title page and the scenes of the last parse so
/// callers can query them after [`ScreenplayParser::parse`].
#[derive(Debug, Default)]
pub struct ScreenplayParser {
    title_page: HashMap<String, String>,
    scenes: Vec<Scene>,
}

impl ScreenplayParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse screenplay text into ordered scenes.
    pub fn parse(&mut self, text: &str) -> Vec<Scene> {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut cursor = LineCursor::new(&lines);

        self.title_page = cursor.title_page();
        self.scenes.clear();

        while !cursor.at_end() {
            let scene_number = self.scenes.len() as u32 + 1;
            if let Some(scene) = cursor.next_scene(scene_number) {
                self.scenes.push(scene);
            }
        }

        debug!(
            lines = lines.len(),
            scenes = self.scenes.len(),
            title_entries = self.title_page.len(),
            "Parsed screenplay"
        );

        self.scenes.clone()
    }

    /// Read and parse a screenplay file.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> ScreenplayResult<Vec<Scene>> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.parse(&content))
    }

    /// Title page entries from the last parse, keys lowercased.
    pub fn title_page(&self) -> &HashMap<String, String> {
        &self.title_page
    }

    pub fn title(&self) -> Option<&str> {
        self.title_page.get("title").map(String::as_str)
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// All attributed dialogue of the last parse, space separated.
    pub fn all_dialogue_text(&self) -> String {
        self.scenes
            .iter()
            .flat_map(|s| s.dialogue())
            .map(|d| d.text)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// All action lines of the last parse, space separated.
    pub fn all_action_text(&self) -> String {
        self.scenes
            .iter()
            .flat_map(|s| s.action_lines())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Parse screenplay text with a fresh parser.
pub fn parse_screenplay(text: &str) -> Vec<Scene> {
    ScreenplayParser::new().parse(text)
}

struct LineCursor<'a> {
    lines: &'a [&'a str],
    pos: usize,
    /// Whether the last non-blank, non-parenthetical body line was cue-shaped.
    after_cue: bool,
}

impl<'a> LineCursor<'a> {
    fn new(lines: &'a [&'a str]) -> Self {
        Self {
            lines,
            pos: 0,
            after_cue: false,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    fn current(&self) -> &'a str {
        self.lines[self.pos].trim()
    }

    fn peek_next(&self) -> Option<&'a str> {
        self.lines.get(self.pos + 1).map(|l| l.trim())
    }

    /// Consume leading `Key: Value` lines up to the first blank line.
    fn title_page(&mut self) -> HashMap<String, String> {
        let mut entries = HashMap::new();

        while !self.at_end() {
            let line = self.current();
            if line.is_empty() {
                self.pos += 1;
                break;
            }

            match patterns::title_page_entry(line) {
                Some((key, value)) => {
                    entries.insert(key, value);
                    self.pos += 1;
                }
                None => break,
            }
        }

        entries
    }

    /// Advance to the next heading candidate and read one scene.
    ///
    /// Returns `None` at end of input, or when the candidate line is not a
    /// valid heading; in that case only that line is skipped.
    fn next_scene(&mut self, scene_number: u32) -> Option<Scene> {
        while !self.at_end() && !patterns::is_heading_candidate(self.current()) {
            self.pos += 1;
        }
        if self.at_end() {
            return None;
        }

        let heading_line = self.current();
        let Some(heading) = patterns::parse_heading(heading_line) else {
            debug!(line = self.pos, text = heading_line, "Skipping malformed scene heading");
            self.pos += 1;
            return None;
        };

        let start_line = self.pos;
        self.pos += 1;
        self.after_cue = false;

        let mut elements = Vec::new();
        while !self.at_end() {
            let line = self.current();
            if patterns::is_heading(line) {
                break;
            }
            if !line.is_empty() {
                elements.push(self.classify(line));
            }
            self.pos += 1;
        }

        Some(Scene {
            scene_number,
            heading: heading_line.to_string(),
            location: heading.location,
            time_of_day: heading
                .time_of_day
                .unwrap_or_else(|| UNKNOWN_TIME_OF_DAY.to_string()),
            interior_exterior: heading.interior_exterior,
            elements,
            start_line,
            end_line: self.pos,
        })
    }

    /// Classify a non-blank body line, first match wins.
    fn classify(&mut self, line: &str) -> Element {
        let line_number = self.pos;
        let follows_cue = self.after_cue;
        if !patterns::is_parenthetical(line) {
            self.after_cue = patterns::is_cue_shaped(line);
        }

        if let Some(text) = patterns::centered_text(line) {
            return Element::new(ElementType::Centered, text, line_number);
        }

        if patterns::is_transition(line) {
            return Element::new(ElementType::Transition, line, line_number);
        }

        if patterns::is_cue_shaped(line) && self.starts_speech() {
            let name = line.trim_end_matches('^').trim();
            return Element::new(ElementType::Character, name, line_number);
        }

        if patterns::is_parenthetical(line) {
            return Element::new(ElementType::Parenthetical, line, line_number);
        }

        if let Some((level, title)) = patterns::section(line) {
            return Element::new(ElementType::Section, title, line_number)
                .with_metadata("level", serde_json::json!(level));
        }

        if let Some(text) = patterns::synopsis_text(line) {
            return Element::new(ElementType::Synopsis, text, line_number);
        }

        if patterns::is_page_break(line) {
            return Element::new(ElementType::PageBreak, "", line_number);
        }

        if let Some(text) = patterns::note_text(line) {
            return Element::new(ElementType::Note, text, line_number);
        }

        if follows_cue {
            return Element::new(ElementType::Dialogue, line, line_number);
        }

        Element::new(ElementType::Action, line, line_number)
    }

    /// A cue starts speech when the next line is non-blank and is either a
    /// parenthetical or not itself cue-shaped.
    fn starts_speech(&self) -> bool {
        match self.peek_next() {
            Some(next) if !next.is_empty() => next.starts_with('(') || !patterns::is_cue_shaped(next),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(scene: &Scene) -> Vec<ElementType> {
        scene.elements.iter().map(|e| e.element_type).collect()
    }

    #[test]
    fn test_single_dialogue_scene() {
        let scenes = parse_screenplay("INT. CAFE - DAY\n\nJOHN\nHello world.");
        assert_eq!(scenes.len(), 1);

        let scene = &scenes[0];
        assert_eq!(scene.scene_number, 1);
        assert_eq!(scene.location, "CAFE");
        assert_eq!(scene.time_of_day, "DAY");
        assert_eq!(scene.interior_exterior, "INT");
        assert_eq!(scene.start_line, 0);
        assert_eq!(scene.end_line, 4);
        assert_eq!(types(scene), vec![ElementType::Character, ElementType::Dialogue]);
        assert_eq!(scene.elements[0].line_number, 2);
        assert_eq!(scene.elements[1].content, "Hello world.");
    }

    #[test]
    fn test_two_scenes_in_order() {
        let scenes = parse_screenplay("INT. ROOM ONE - DAY\n\nEXT. STREET - NIGHT\n");
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].interior_exterior, "INT");
        assert_eq!(scenes[0].location, "ROOM ONE");
        assert_eq!(scenes[0].end_line, 2);
        assert_eq!(scenes[1].interior_exterior, "EXT");
        assert_eq!(scenes[1].time_of_day, "NIGHT");
        assert_eq!(scenes[1].scene_number, 2);
        assert!(scenes[0].elements.is_empty());
    }

    #[test]
    fn test_missing_time_of_day() {
        let scenes = parse_screenplay("EXT. DESERT\nSand everywhere.");
        assert_eq!(scenes[0].time_of_day, UNKNOWN_TIME_OF_DAY);
        assert_eq!(scenes[0].location, "DESERT");
        assert_eq!(types(&scenes[0]), vec![ElementType::Action]);
    }

    #[test]
    fn test_title_page() {
        let text = "Title: The Long Night\nAuthor: Jane Roe\n\nINT. CAFE - DAY\nRain.";
        let mut parser = ScreenplayParser::new();
        let scenes = parser.parse(text);

        assert_eq!(parser.title(), Some("The Long Night"));
        assert_eq!(parser.title_page().get("author").map(String::as_str), Some("Jane Roe"));
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].start_line, 3);
    }

    #[test]
    fn test_malformed_heading_is_skipped() {
        let scenes = parse_screenplay("INT.\nSomething happens.\nEXT. PARK - DAY\nBirds sing.");
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].location, "PARK");
        assert_eq!(scenes[0].scene_number, 1);
    }

    #[test]
    fn test_text_without_headings() {
        assert!(parse_screenplay("").is_empty());
        assert!(parse_screenplay("Just some prose.\nNo scenes here.").is_empty());
    }

    #[test]
    fn test_element_precedence() {
        let text = "INT. STUDIO - NIGHT\n\
                    > THE END <\n\
                    CUT TO:\n\
                    # Act One\n\
                    = They meet.\n\
                    ===\n\
                    [[fix later]]\n\
                    She leaves.";
        let scenes = parse_screenplay(text);
        let scene = &scenes[0];
        assert_eq!(
            types(scene),
            vec![
                ElementType::Centered,
                ElementType::Transition,
                ElementType::Section,
                ElementType::Synopsis,
                ElementType::PageBreak,
                ElementType::Note,
                ElementType::Action,
            ]
        );
        assert_eq!(scene.elements[0].content, "THE END");
        assert_eq!(scene.elements[2].section_level(), Some(1));
        assert_eq!(scene.elements[4].content, "");
        assert_eq!(scene.elements[5].content, "fix later");
    }

    #[test]
    fn test_parenthetical_between_cue_and_dialogue() {
        let text = "INT. OFFICE - DAY\nMARY (V.O.) ^\n(whispering)\nDon't move.\n\nShe waits.";
        let scenes = parse_screenplay(text);
        let scene = &scenes[0];
        assert_eq!(
            types(scene),
            vec![
                ElementType::Character,
                ElementType::Parenthetical,
                ElementType::Dialogue,
                ElementType::Action,
            ]
        );
        assert_eq!(scene.elements[0].content, "MARY (V.O.)");

        let dialogue = scene.dialogue();
        assert_eq!(dialogue.len(), 1);
        assert_eq!(dialogue[0].character, "MARY (V.O.)");
        assert_eq!(dialogue[0].text, "Don't move.");
    }

    #[test]
    fn test_stacked_caps_lines_are_not_cues() {
        // A caps line followed by another caps line is not a cue
        let text = "INT. HALL - DAY\nBANG\nTHE DOOR SLAMS.\nsilence";
        let scenes = parse_screenplay(text);
        let scene = &scenes[0];
        assert_eq!(scene.elements[0].element_type, ElementType::Action);
        assert_eq!(scene.elements[1].element_type, ElementType::Character);
        assert_eq!(scene.elements[2].element_type, ElementType::Dialogue);
    }

    #[test]
    fn test_cue_before_blank_line_is_action() {
        let text = "INT. HALL - DAY\nBOOM\n\nThe walls shake.";
        let scenes = parse_screenplay(text);
        assert_eq!(
            types(&scenes[0]),
            vec![ElementType::Action, ElementType::Dialogue]
        );
    }

    #[test]
    fn test_heading_without_time_does_not_start_dialogue() {
        let text = "INT. CAFE\nRain on the windows.";
        let scenes = parse_screenplay(text);
        assert_eq!(types(&scenes[0]), vec![ElementType::Action]);
    }

    #[test]
    fn test_scene_ranges_do_not_overlap() {
        let text = "Title: X\n\nINT. A - DAY\nOne.\n\nEXT. B - NIGHT\nTwo.\nJOE\nHi.\nINT. C - DAY\nThree.";
        let scenes = parse_screenplay(text);
        assert_eq!(scenes.len(), 3);
        for pair in scenes.windows(2) {
            assert!(pair[0].start_line < pair[1].start_line);
            assert!(pair[0].end_line <= pair[1].start_line);
        }
        for scene in &scenes {
            for element in &scene.elements {
                assert!(scene.start_line < element.line_number);
                assert!(element.line_number < scene.end_line);
            }
        }
    }

    #[test]
    fn test_all_text_helpers() {
        let text = "INT. CAFE - DAY\nRain falls.\nJOHN\nHello.\nMARY\nHi there.";
        let mut parser = ScreenplayParser::new();
        parser.parse(text);
        assert_eq!(parser.all_dialogue_text(), "Hello. Hi there.");
        assert_eq!(parser.all_action_text(), "Rain falls.");
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.fountain");
        std::fs::write(&path, "EXT. PARK - DAY\nBirds sing.\n").unwrap();

        let mut parser = ScreenplayParser::new();
        let scenes = parser.parse_file(&path).unwrap();
        assert_eq!(scenes.len(), 1);
        assert_eq!(parser.scenes().len(), 1);

        assert!(parser.parse_file(dir.path().join("missing.fountain")).is_err());
    }
}
