//! Lexicon Classifier - deterministic emotion scoring and content moderation.
//!
//! Pure keyword scanning over fixed word lists, no external dependency.
//! This is the correctness floor of the analysis pipeline: it is used for
//! every moderation decision and whenever the model path is unavailable or
//! fails. All operations are total and never fail, including on empty input.

use crate::models::{AnalysisResult, Emotion, Moderation, Verdict};

/// Positive emotion markers.
const POSITIVE_KEYWORDS: &[&str] = &["행복", "기쁨", "감사", "좋다", "설레", "신난"];

/// Negative emotion markers. Also the review trigger list for moderation.
const NEGATIVE_KEYWORDS: &[&str] = &["슬픔", "우울", "짜증", "화나", "불안", "걱정", "힘들"];

/// Hard-block markers (self-harm, violence, profanity).
const BLOCK_KEYWORDS: &[&str] = &["자살", "죽고", "폭탄", "살해", "욕"];

/// Advice templates keyed by emotion label. Fixed text, no parameterization.
const ADVICE_POSITIVE: &str = "오늘의 긍정 에너지를 잘 기록했어요. 이 기분을 이어가요!";
const ADVICE_NEGATIVE: &str =
    "힘든 감정을 인정한 것만으로도 큰 발걸음이에요. 잠시 호흡을 고르고 자신을 돌봐주세요.";
const ADVICE_NEUTRAL: &str =
    "차분한 하루였네요. 가볍게 산책하거나 좋아하는 음악으로 마음을 채워봐요.";

/// Summary length cap in characters; longer input is cut to 77 + "...".
const SUMMARY_MAX_CHARS: usize = 80;
const SUMMARY_TRUNCATE_AT: usize = 77;

/// Immutable keyword lists consumed by the classifier.
///
/// Injected at construction so tests can exercise the scoring rules with
/// synthetic lexicons.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub block: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive: POSITIVE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            negative: NEGATIVE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            block: BLOCK_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Deterministic keyword-scoring classifier.
pub struct LexiconClassifier {
    lexicon: Lexicon,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    /// Create a classifier with the built-in Korean lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::default())
    }

    /// Create a classifier over a custom lexicon.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Moderate content by substring containment against the block and
    /// negative lists. Block takes precedence over review.
    ///
    /// Matching is case-insensitive with no further normalization.
    pub fn moderate(&self, content: &str) -> Moderation {
        let lower = content.to_lowercase();

        if self.lexicon.block.iter().any(|w| lower.contains(w.as_str())) {
            return Moderation {
                verdict: Verdict::Block,
                confidence: 0.9,
            };
        }

        if self
            .lexicon
            .negative
            .iter()
            .any(|w| lower.contains(w.as_str()))
        {
            return Moderation {
                verdict: Verdict::Review,
                confidence: 0.7,
            };
        }

        Moderation {
            verdict: Verdict::Allow,
            confidence: 0.35,
        }
    }

    /// Raw emotion score and label.
    ///
    /// Each lexicon word contributes at most once (membership, not count).
    /// The integer score is clamped to [-2, 2] and mapped linearly onto a
    /// 0-100 scale; >60 is positive, <40 negative, otherwise neutral.
    pub fn analyze_emotion(&self, content: &str) -> (Emotion, f64) {
        let mut score: i32 = 0;
        for word in &self.lexicon.positive {
            if content.contains(word.as_str()) {
                score += 1;
            }
        }
        for word in &self.lexicon.negative {
            if content.contains(word.as_str()) {
                score -= 1;
            }
        }

        let clamped = score.clamp(-2, 2);
        let scaled = (clamped as f64 / 2.0 + 0.5) * 100.0;

        let emotion = if scaled > 60.0 {
            Emotion::Positive
        } else if scaled < 40.0 {
            Emotion::Negative
        } else {
            Emotion::Neutral
        };

        (emotion, scaled)
    }

    /// Full heuristic analysis: emotion, persisted score, summary, advice.
    /// Keywords are always empty on this path.
    pub fn heuristic_analyze(&self, content: &str) -> AnalysisResult {
        let (emotion, scaled) = self.analyze_emotion(content);
        let moderation = self.moderate(content);

        AnalysisResult {
            emotion,
            // 0-100 scale down to the persisted 0-10 scale.
            emotion_score: round2(scaled / 10.0),
            summary: summarize(content),
            advice: advice_for(emotion).to_string(),
            moderation_verdict: moderation.verdict,
            moderation_confidence: moderation.confidence,
            keywords: Vec::new(),
        }
    }
}

/// Input verbatim up to 80 characters, else the first 77 plus an ellipsis.
pub fn summarize(content: &str) -> String {
    if content.chars().count() <= SUMMARY_MAX_CHARS {
        return content.to_string();
    }
    let head: String = content.chars().take(SUMMARY_TRUNCATE_AT).collect();
    format!("{}...", head)
}

/// Fixed advice template for an emotion label.
pub fn advice_for(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Positive => ADVICE_POSITIVE,
        Emotion::Negative => ADVICE_NEGATIVE,
        Emotion::Neutral => ADVICE_NEUTRAL,
    }
}

/// Round to two decimal places, the precision of the persisted score columns.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
