//! The fixed system instruction for model-based journal analysis, plus the
//! cleanup applied to model replies before JSON parsing.
//!
//! This is the final version of the output contract: exactly five keys
//! (label, confidence, keywords, summary, feedback) in one JSON object.
//! Older prompt variants are not supported.

/// Behavioral contract sent as the system message on every model call.
pub const SYSTEM_PROMPT: &str = "당신은 감정 일기 분석 전문가입니다. 사용자의 일기를 읽고 아래 규칙에 따라 분석하세요.\n\
규칙:\n\
1. label: \"긍정\", \"중립\", \"부정\", \"혼합\" 중 정확히 하나.\n\
2. confidence: 0과 1 사이의 숫자. 긍정·부정이 뚜렷하면 0.7~0.95, 중립이면 0.4~0.6, 혼합이면 0.5~0.7.\n\
3. keywords: 일기의 핵심 단어 2~5개로 이루어진 배열.\n\
4. summary: 일기를 한국어 20자 이내로 요약. 이모지와 특수기호는 사용하지 않는다.\n\
5. feedback: 보통 1~2문장의 짧은 공감과 조언. 자해, 자살, 극단적 선택 등 위험 신호가 보이면 6~8문장으로 확장하고, 반드시 정신건강 전문가 상담이나 상담 전화(1393)를 권유하는 문장을 포함한다.\n\
출력은 label, confidence, keywords, summary, feedback 다섯 개의 키만 가진 JSON 객체 하나여야 한다. JSON 외의 문장, 설명, 추가 키를 출력하지 않는다.";

/// Strip a surrounding Markdown code fence from a model reply, if present.
///
/// Models instructed to emit raw JSON occasionally wrap it in ```json ...```
/// anyway; the fence (and its optional language tag) is not part of the
/// payload.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line, if any.
    let body = match body.split_once('\n') {
        Some((tag, remainder)) if tag.trim().chars().all(|c| c.is_ascii_alphanumeric()) => remainder,
        _ => body,
    };
    body.trim()
}
