//! Analyzer Orchestration Tests
//!
//! End-to-end behavior of the journal analyzer over mock completion
//! backends: the model path with normalization, and the heuristic fallback
//! on every failure mode.

use crate::brain::JournalAnalyzer;
use crate::error::AppError;
use crate::gateway::{CompletionBackend, CompletionRequest};
use crate::models::{Emotion, Verdict};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Mock completion backend driven by a closure.
struct MockBackend {
    configured: bool,
    response_fn: Box<dyn Fn() -> Result<Value, AppError> + Send + Sync>,
}

impl MockBackend {
    fn replying<F>(f: F) -> Arc<Self>
    where
        F: Fn() -> Result<Value, AppError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            configured: true,
            response_fn: Box::new(f),
        })
    }

    fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            configured: false,
            response_fn: Box::new(|| {
                panic!("Unconfigured backend must never be called")
            }),
        })
    }
}

#[async_trait]
impl CompletionBackend for MockBackend {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<Value, AppError> {
        (self.response_fn)()
    }
}

/// Wrap message text in the service's standard success shape.
fn chat_reply(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "choices": [{"message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
    })
}

#[tokio::test]
async fn test_unconfigured_backend_uses_heuristic() {
    let analyzer = JournalAnalyzer::new(MockBackend::unconfigured());

    let result = analyzer.analyze("행복하고 감사한 하루").await;
    assert_eq!(result.emotion, Emotion::Positive);
    assert_eq!(result.emotion_score, 10.0);
    assert_eq!(result.moderation_verdict, Verdict::Allow);
    assert!(result.keywords.is_empty());
    assert!(!result.advice.is_empty());
}

#[tokio::test]
async fn test_gateway_failure_falls_back_end_to_end() {
    let analyzer = JournalAnalyzer::new(MockBackend::replying(|| {
        Err(AppError::Api {
            status: 500,
            body: "Internal Server Error".to_string(),
        })
    }));

    let result = analyzer.analyze("오늘 너무 힘들었어요").await;
    assert_eq!(result.emotion, Emotion::Negative);
    assert!(!result.advice.is_empty());
    assert!(result.keywords.is_empty());
    // Moderation comes from the local lexicon regardless of the model path.
    assert_eq!(result.moderation_verdict, Verdict::Review);
    assert_eq!(result.moderation_confidence, 0.7);
}

#[tokio::test]
async fn test_model_verdict_is_normalized() {
    let analyzer = JournalAnalyzer::new(MockBackend::replying(|| {
        Ok(chat_reply(
            "{\"label\":\"긍정\",\"confidence\":0.88,\"keywords\":[\"감사\",\"산책\"],\"summary\":\"감사한 하루\",\"feedback\":\"좋은 흐름이에요.\"}",
        ))
    }));

    let result = analyzer.analyze("감사한 마음으로 산책을 했다").await;
    assert_eq!(result.emotion, Emotion::Positive);
    assert_eq!(result.emotion_score, 8.8);
    assert_eq!(result.summary, "감사한 하루");
    assert_eq!(result.advice, "좋은 흐름이에요.");
    assert_eq!(result.keywords, vec!["감사", "산책"]);
}

#[tokio::test]
async fn test_mixed_label_collapses_and_confidence_clamps() {
    let analyzer = JournalAnalyzer::new(MockBackend::replying(|| {
        Ok(chat_reply(
            "{\"label\":\"혼합\",\"confidence\":1.5,\"keywords\":[],\"summary\":\"복잡한 하루\",\"feedback\":\"그럴 수 있어요.\"}",
        ))
    }));

    let result = analyzer.analyze("웃다가 울었던 하루").await;
    assert_eq!(result.emotion, Emotion::Neutral);
    assert_eq!(result.emotion_score, 10.0);
}

#[tokio::test]
async fn test_code_fenced_reply_is_parsed() {
    let analyzer = JournalAnalyzer::new(MockBackend::replying(|| {
        Ok(chat_reply(
            "```json\n{\"label\":\"부정\",\"confidence\":0.7,\"keywords\":[\"걱정\"],\"summary\":\"걱정 많은 하루\",\"feedback\":\"잠시 쉬어가요.\"}\n```",
        ))
    }));

    let result = analyzer.analyze("걱정이 많았다").await;
    assert_eq!(result.emotion, Emotion::Negative);
    assert_eq!(result.emotion_score, 7.0);
    assert_eq!(result.keywords, vec!["걱정"]);
}

#[tokio::test]
async fn test_malformed_json_falls_back() {
    let analyzer = JournalAnalyzer::new(MockBackend::replying(|| {
        Ok(chat_reply("오늘의 감정은 긍정이에요!"))
    }));

    let result = analyzer.analyze("행복하고 감사한 하루").await;
    // Heuristic result: the model's prose reply is not a contract violation
    // the caller ever sees.
    assert_eq!(result.emotion, Emotion::Positive);
    assert_eq!(result.emotion_score, 10.0);
    assert!(result.keywords.is_empty());
}

#[tokio::test]
async fn test_empty_completion_falls_back() {
    let analyzer = JournalAnalyzer::new(MockBackend::replying(|| {
        Ok(json!({
            "id": "chatcmpl-empty",
            "choices": [{"message": {"content": null}, "finish_reason": "length"}]
        }))
    }));

    let result = analyzer.analyze("오늘 너무 힘들었어요").await;
    assert_eq!(result.emotion, Emotion::Negative);
    assert_eq!(result.moderation_verdict, Verdict::Review);
}

#[tokio::test]
async fn test_moderation_is_never_delegated_to_the_model() {
    // The model calls the entry positive, but the local lexicon finds a
    // block-listed term; the verdict must be block either way.
    let analyzer = JournalAnalyzer::new(MockBackend::replying(|| {
        Ok(chat_reply(
            "{\"label\":\"긍정\",\"confidence\":0.9,\"keywords\":[],\"summary\":\"좋은 하루\",\"feedback\":\"멋져요.\"}",
        ))
    }));

    let result = analyzer.analyze("행복하지만 자살 생각이 난다").await;
    assert_eq!(result.emotion, Emotion::Positive);
    assert_eq!(result.moderation_verdict, Verdict::Block);
    assert_eq!(result.moderation_confidence, 0.9);
}

#[tokio::test]
async fn test_coach_projects_analysis() {
    let analyzer = JournalAnalyzer::new(MockBackend::unconfigured());

    let coached = analyzer.coach("행복하고 감사한 하루").await;
    assert_eq!(coached.emotion, Emotion::Positive);
    assert_eq!(coached.summary, "행복하고 감사한 하루");
    assert!(!coached.advice.is_empty());
}

#[tokio::test]
async fn test_moderate_surface() {
    let analyzer = JournalAnalyzer::new(MockBackend::unconfigured());

    let moderation = analyzer.moderate("폭탄을 만들고 싶다");
    assert_eq!(moderation.verdict, Verdict::Block);
}

#[tokio::test]
async fn test_weekly_report_is_well_formed() {
    let analyzer = JournalAnalyzer::new(MockBackend::unconfigured());

    let report = analyzer.weekly_report();
    assert!(!report.summary.is_empty());
    assert!(!report.highlight.is_empty());
    for value in [report.positivity, report.negativity, report.stability] {
        assert!((0.0..=1.0).contains(&value));
    }
}

#[tokio::test]
async fn test_result_serializes_with_wire_names() {
    let analyzer = JournalAnalyzer::new(MockBackend::unconfigured());

    let result = analyzer.analyze("오늘 너무 힘들었어요").await;
    let wire = serde_json::to_value(&result).unwrap();
    assert_eq!(wire["emotion"], "negative");
    assert_eq!(wire["moderationVerdict"], "review");
    assert!(wire["emotionScore"].is_number());
    assert!(wire["advice"].is_string());
}
