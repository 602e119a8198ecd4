//! Pipeline metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! embedding process installs a recorder.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const BEATS_EMITTED_TOTAL: &str = "sis_beats_emitted_total";
    pub const ELEMENTS_DROPPED_TOTAL: &str = "sis_elements_dropped_total";
    pub const SCENES_DROPPED_TOTAL: &str = "sis_scenes_dropped_total";
    pub const SCENES_ANALYZED_TOTAL: &str = "sis_scenes_analyzed_total";
    pub const ANALYSIS_DURATION_SECONDS: &str = "sis_analysis_duration_seconds";
}

pub fn record_beats_emitted(count: usize) {
    counter!(names::BEATS_EMITTED_TOTAL).increment(count as u64);
}

/// Record an element dropped because classification failed.
pub fn record_element_dropped(element_type: &str) {
    let labels = [("element_type", element_type.to_string())];
    counter!(names::ELEMENTS_DROPPED_TOTAL, &labels).increment(1);
}

pub fn record_scene_dropped() {
    counter!(names::SCENES_DROPPED_TOTAL).increment(1);
}

pub fn record_scene_analyzed() {
    counter!(names::SCENES_ANALYZED_TOTAL).increment(1);
}

pub fn record_analysis_duration(scenes: usize, duration_secs: f64) {
    let labels = [("outcome", if scenes > 0 { "ok" } else { "empty" }.to_string())];
    histogram!(names::ANALYSIS_DURATION_SECONDS, &labels).record(duration_secs);
}
