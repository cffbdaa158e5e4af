//! Journal Analyzer - orchestrator of the analysis pipeline.
//!
//! Combines local moderation, a best-effort model analysis through the
//! completion gateway, and the deterministic heuristic fallback.
//!
//! The external contract is total: `analyze` always returns a complete,
//! well-formed result. Degraded quality (heuristic instead of model-based)
//! is the only observable effect of an upstream failure.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use super::lexicon::{advice_for, round2, summarize, LexiconClassifier};
use super::prompt::{strip_code_fence, SYSTEM_PROMPT};
use crate::error::AppError;
use crate::gateway::{extract_message_text, CompletionBackend, CompletionRequest};
use crate::models::{AnalysisResult, CoachResult, Emotion, Moderation, WeeklyReport};

/// Sampling temperature for the analysis call. The contract leaves no room
/// for creativity, and 1.0 is the one value every deployment accepts.
const ANALYSIS_TEMPERATURE: f64 = 1.0;

/// Output budget for the five-key JSON object, with headroom for the
/// expanded risk-referral feedback.
const ANALYSIS_MAX_TOKENS: u32 = 800;

/// Keywords persisted with an entry are capped at this many.
const MAX_KEYWORDS: usize = 5;

/// Confidence substituted when the model reports a non-numeric value.
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Orchestrates moderation, model analysis, and heuristic fallback.
///
/// Holds no per-call state; concurrent `analyze` calls are independent.
pub struct JournalAnalyzer {
    lexicon: LexiconClassifier,
    gateway: Arc<dyn CompletionBackend>,
}

impl JournalAnalyzer {
    /// Create an analyzer over the given completion backend, with the
    /// built-in lexicon.
    pub fn new(gateway: Arc<dyn CompletionBackend>) -> Self {
        Self {
            lexicon: LexiconClassifier::new(),
            gateway,
        }
    }

    /// Create an analyzer with a custom lexicon classifier.
    pub fn with_classifier(gateway: Arc<dyn CompletionBackend>, lexicon: LexiconClassifier) -> Self {
        Self { lexicon, gateway }
    }

    /// Moderate content without running the full analysis.
    pub fn moderate(&self, content: &str) -> Moderation {
        self.lexicon.moderate(content)
    }

    /// Analyze one journal entry. Never fails.
    pub async fn analyze(&self, content: &str) -> AnalysisResult {
        // 1. Moderation always runs locally; it is never delegated to the
        //    model and never skipped.
        let moderation = self.lexicon.moderate(content);

        // 2. No credential is a supported steady state: heuristic path,
        //    no logging noise.
        if !self.gateway.is_configured() {
            return self.heuristic_result(content, moderation);
        }

        // 3-5. Model path. Any failure (gateway, extraction, parse) falls
        // back to the heuristic result; nothing propagates to the caller.
        match self.model_analysis(content, moderation).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "Model analysis failed, using heuristic fallback");
                self.heuristic_result(content, moderation)
            }
        }
    }

    /// Coaching view of an analysis: summary, advice and emotion only.
    pub async fn coach(&self, content: &str) -> CoachResult {
        let result = self.analyze(content).await;
        CoachResult {
            summary: result.summary,
            advice: result.advice,
            emotion: result.emotion,
        }
    }

    /// Weekly emotion report. Placeholder values until report aggregation
    /// moves into the persistence collaborator.
    pub fn weekly_report(&self) -> WeeklyReport {
        WeeklyReport {
            summary: "이번 주 감정은 안정적이었으며 자기돌봄 실천이 잘 유지되고 있어요.".to_string(),
            highlight: "감정 기록을 5일 연속 이어갔어요!".to_string(),
            positivity: 0.62,
            negativity: 0.21,
            stability: 0.73,
        }
    }

    fn heuristic_result(&self, content: &str, moderation: Moderation) -> AnalysisResult {
        let mut result = self.lexicon.heuristic_analyze(content);
        result.moderation_verdict = moderation.verdict;
        result.moderation_confidence = moderation.confidence;
        result
    }

    async fn model_analysis(
        &self,
        content: &str,
        moderation: Moderation,
    ) -> Result<AnalysisResult, AppError> {
        let request = CompletionRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: content.to_string(),
            temperature: Some(ANALYSIS_TEMPERATURE),
            max_tokens: Some(ANALYSIS_MAX_TOKENS),
        };

        let response = self.gateway.complete(request).await?;
        let text = extract_message_text(&response)?;
        let verdict: Value = serde_json::from_str(strip_code_fence(&text))?;

        Ok(normalize_model_verdict(&verdict, content, moderation))
    }
}

/// Coerce the model's five-key JSON object into a well-formed result.
///
/// Individual values are tolerated and coerced rather than rejected; only
/// unparseable JSON (handled by the caller) is terminal for the model path.
fn normalize_model_verdict(
    verdict: &Value,
    content: &str,
    moderation: Moderation,
) -> AnalysisResult {
    let emotion = normalize_label(verdict["label"].as_str().unwrap_or(""));
    let confidence = coerce_confidence(&verdict["confidence"]);

    let summary = match verdict["summary"].as_str().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => summarize(content),
    };
    let advice = match verdict["feedback"].as_str().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => advice_for(emotion).to_string(),
    };

    AnalysisResult {
        emotion,
        // Model confidence (0-1) rescaled to the persisted 0-10 score.
        emotion_score: round2(confidence * 10.0),
        summary,
        advice,
        moderation_verdict: moderation.verdict,
        moderation_confidence: moderation.confidence,
        keywords: normalize_keywords(&verdict["keywords"]),
    }
}

/// Fixed alias table from the model's label vocabulary to the persisted
/// emotion. 혼합 (mixed) and every unrecognized label collapse to neutral;
/// mixed is not a distinct state at the boundary.
fn normalize_label(label: &str) -> Emotion {
    match label.trim().to_lowercase().as_str() {
        "긍정" | "positive" => Emotion::Positive,
        "부정" | "negative" => Emotion::Negative,
        _ => Emotion::Neutral,
    }
}

/// Confidence as reported by the model: a number, or a numeric string.
/// Non-finite or missing values default to 0.5; the result is clamped to
/// [0, 1].
fn coerce_confidence(value: &Value) -> f64 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match raw {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => DEFAULT_CONFIDENCE,
    }
}

/// Keywords trimmed, blanks dropped, capped at five. Numeric entries are
/// stringified rather than rejected.
fn normalize_keywords(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .take(MAX_KEYWORDS)
        .collect()
}
