//! Emotion service request/response types.

use serde::{Deserialize, Serialize};

/// Text classification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub inputs: String,
}

/// One label score from the classification model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Classification response.
///
/// Services return either a flat score list or one list per input.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ClassifyResponse {
    Flat(Vec<LabelScore>),
    Batched(Vec<Vec<LabelScore>>),
}

impl ClassifyResponse {
    /// Scores for the single submitted input.
    pub fn into_scores(self) -> Vec<LabelScore> {
        match self {
            ClassifyResponse::Flat(scores) => scores,
            ClassifyResponse::Batched(batches) => batches.into_iter().next().unwrap_or_default(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_shapes() {
        let flat: ClassifyResponse =
            serde_json::from_str(r#"[{"label": "fear", "score": 0.9}]"#).unwrap();
        assert_eq!(flat.into_scores().len(), 1);

        let batched: ClassifyResponse = serde_json::from_str(
            r#"[[{"label": "joy", "score": 0.6}, {"label": "neutral", "score": 0.3}]]"#,
        )
        .unwrap();
        let scores = batched.into_scores();
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].label, "joy");
    }
}
