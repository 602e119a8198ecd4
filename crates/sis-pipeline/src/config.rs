//! Pipeline configuration.

use std::path::PathBuf;

/// Reading rate used to turn word counts into beat durations.
pub const WORDS_PER_SECOND: f64 = 2.5;

/// Shortest duration a beat can have, in seconds.
pub const MIN_BEAT_SECONDS: f64 = 1.0;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the knowledge base JSON files
    pub knowledge_base_dir: PathBuf,
    /// Maximum classifier calls in flight for one scene
    pub max_concurrent_classifications: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            knowledge_base_dir: PathBuf::from("./knowledge-base"),
            max_concurrent_classifications: 1,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            knowledge_base_dir: std::env::var("KNOWLEDGE_BASE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.knowledge_base_dir),
            max_concurrent_classifications: std::env::var("SIS_MAX_CONCURRENT_CLASSIFICATIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.max_concurrent_classifications),
        }
    }

    pub fn with_knowledge_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.knowledge_base_dir = dir.into();
        self
    }

    /// Set classifier concurrency; zero is treated as one.
    pub fn with_max_concurrent_classifications(mut self, n: usize) -> Self {
        self.max_concurrent_classifications = n.max(1);
        self
    }
}
