//! Timing, pacing and power estimates derived from beat text.

use sis_models::{EmotionType, PacingMetadata, PowerBalance, PowerDynamics, Rhythm};

use crate::config::{MIN_BEAT_SECONDS, WORDS_PER_SECOND};

/// Words per second above which a beat reads as fast.
const FAST_WORDS_PER_SECOND: f64 = 3.0;
/// Words per second below which a beat reads as slow.
const SLOW_WORDS_PER_SECOND: f64 = 1.5;

const FAST_BPM: u16 = 140;
const MEDIUM_BPM: u16 = 120;
const SLOW_BPM: u16 = 60;

const DOMINANT_SCORE: u8 = 80;
const EQUAL_SCORE: u8 = 50;
const SUBMISSIVE_SCORE: u8 = 30;

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated on-screen duration of a beat in seconds.
pub fn estimate_duration(text: &str) -> f64 {
    (word_count(text) as f64 / WORDS_PER_SECOND).max(MIN_BEAT_SECONDS)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Pacing from reading speed, word length and verb-like endings.
pub fn estimate_pacing(text: &str, duration: f64) -> PacingMetadata {
    let words: Vec<&str> = text.split_whitespace().collect();
    let count = words.len();

    let (bpm, rhythm) = if duration > 0.0 {
        let words_per_second = count as f64 / duration;
        if words_per_second > FAST_WORDS_PER_SECOND {
            (FAST_BPM, Rhythm::Fast)
        } else if words_per_second < SLOW_WORDS_PER_SECOND {
            (SLOW_BPM, Rhythm::Slow)
        } else {
            (MEDIUM_BPM, Rhythm::Medium)
        }
    } else {
        (MEDIUM_BPM, Rhythm::Medium)
    };

    let (avg_len, verb_density) = if count > 0 {
        let verbs = words
            .iter()
            .filter(|w| w.ends_with("ing") || w.ends_with("ed"))
            .count();
        let letters: usize = words.iter().map(|w| w.chars().count()).sum();
        (
            letters as f64 / count as f64,
            verbs as f64 / count as f64,
        )
    } else {
        (0.0, 0.0)
    };

    PacingMetadata::new(bpm, rhythm, round_to(avg_len, 1), round_to(verb_density, 2))
}

/// Power estimate for the active speaker; `None` when nobody is speaking.
pub fn estimate_power(speaker: Option<&str>, emotion: EmotionType) -> Option<PowerDynamics> {
    let speaker = speaker?;

    let power = match emotion {
        EmotionType::Anger | EmotionType::Triumph | EmotionType::Disgust => {
            PowerDynamics::new(PowerBalance::Dominant, DOMINANT_SCORE)
                .with_dominant_character(speaker)
        }
        EmotionType::Fear | EmotionType::Sadness | EmotionType::Anxiety => {
            PowerDynamics::new(PowerBalance::Submissive, SUBMISSIVE_SCORE)
        }
        _ => PowerDynamics::new(PowerBalance::Equal, EQUAL_SCORE),
    };

    Some(power)
}
