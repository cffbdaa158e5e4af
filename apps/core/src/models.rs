use serde::{Deserialize, Serialize};
use std::fmt;

/// Emotion label persisted with a journal entry.
///
/// The model's output contract also knows a fourth label, 혼합 (mixed), but it
/// is collapsed to `Neutral` before reaching this type. Mixed is not a
/// distinct state at the storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Emotion::Positive => "positive",
            Emotion::Neutral => "neutral",
            Emotion::Negative => "negative",
        };
        write!(f, "{}", label)
    }
}

/// Moderation verdict for downstream handling (review queues, blocking).
/// Independent of the emotion classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Allow,
    Review,
    Block,
}

/// Result of content moderation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moderation {
    /// One of allow/review/block.
    pub verdict: Verdict,
    /// Confidence in the verdict, 0.0 - 1.0.
    pub confidence: f64,
}

/// Complete analysis of one journal entry, handed to the persistence
/// collaborator to be merged with user/id/timestamps and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Classified emotion, always one of positive/neutral/negative.
    pub emotion: Emotion,
    /// Emotion score on the persisted 0-10 scale, two-decimal precision.
    pub emotion_score: f64,
    /// Short summary of the entry (truncated input on the heuristic path).
    pub summary: String,
    /// Supportive feedback text, never empty.
    pub advice: String,
    /// Moderation verdict computed locally, never by the model.
    pub moderation_verdict: Verdict,
    /// Confidence in the moderation verdict, 0.0 - 1.0.
    pub moderation_confidence: f64,
    /// Up to 5 keywords from the model path; empty on the heuristic path.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Lightweight coaching view of an analysis: no moderation, no keywords.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachResult {
    pub summary: String,
    pub advice: String,
    pub emotion: Emotion,
}

/// Weekly emotion report. Currently a fixed placeholder; real aggregation
/// lives with the persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub summary: String,
    pub highlight: String,
    pub positivity: f64,
    pub negativity: f64,
    pub stability: f64,
}
