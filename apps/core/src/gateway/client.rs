//! OpenAI-compatible completion client.
//!
//! The service's deployments disagree on which request parameters they
//! accept: the output-length cap may be spelled `max_completion_tokens`,
//! `max_tokens`, or be unsupported entirely, and some models reject
//! non-default temperatures. The client negotiates these per call by walking
//! an ordered matrix of (token field, temperature) request variants,
//! classifying each rejection to decide whether to advance the field, the
//! temperature, or give up.

use crate::config::AiConfig;
use crate::error::AppError;
use crate::gateway::traits::{CompletionBackend, CompletionRequest};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::{error, info};
use uuid::Uuid;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Transport-level cap on a single attempt. Surfaces as a generic transport
/// error and routes through the same fallback path as any other failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Candidate names for the output-length cap, tried in order. `None` means
/// omit the cap entirely.
const TOKEN_FIELDS: [Option<&str>; 3] = [Some("max_completion_tokens"), Some("max_tokens"), None];

/// Temperature the service accepts on every model.
const FALLBACK_TEMPERATURE: f64 = 1.0;

/// What to do after a failed attempt, decided from the rejection alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RejectionAction {
    /// The service rejected the token field in use: abandon its remaining
    /// temperature candidates and advance to the next field.
    NextField,
    /// The service rejected the temperature value: retry the same field with
    /// the next temperature candidate.
    NextTemperature,
    /// Unrelated failure: stop negotiating and surface it.
    Abort,
}

/// Classify a failed attempt. Only the two known "unsupported parameter"
/// signatures keep the negotiation going.
fn classify_rejection(
    error: &AppError,
    token_field: Option<&str>,
    temperature_sent: bool,
) -> RejectionAction {
    let Some((status, body)) = error.api_rejection() else {
        return RejectionAction::Abort;
    };
    if status != 400 {
        return RejectionAction::Abort;
    }

    if let Some(field) = token_field {
        if body.contains("Unsupported parameter") && body.contains(field) {
            return RejectionAction::NextField;
        }
    }

    if temperature_sent && body.contains("Unsupported value") && body.contains("temperature") {
        return RejectionAction::NextTemperature;
    }

    RejectionAction::Abort
}

/// Ordered temperature candidates: the caller's preference first, then the
/// guaranteed-supported fallback, deduplicated.
fn temperature_candidates(requested: Option<f64>) -> Vec<f64> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(temp) = requested {
        candidates.push(temp);
    }
    if !candidates.contains(&FALLBACK_TEMPERATURE) {
        candidates.push(FALLBACK_TEMPERATURE);
    }
    candidates
}

/// Gateway to an OpenAI-compatible chat-completion endpoint.
///
/// Holds only immutable configuration; concurrent calls are independent.
pub struct OpenAiGateway {
    client: Client,
    api_key: Option<String>,
    model: String,
    chat_url: String,
}

impl OpenAiGateway {
    /// Build a gateway from the process configuration.
    pub fn new(config: &AiConfig) -> Self {
        Self::with_chat_url(config, OPENAI_CHAT_URL)
    }

    /// Build a gateway against a specific endpoint URL (used by tests to
    /// point at a simulated service).
    pub fn with_chat_url(config: &AiConfig, chat_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: config.openai_api_key.clone(),
            model: config.model.clone(),
            chat_url: chat_url.into(),
        }
    }

    fn build_body(
        &self,
        request: &CompletionRequest,
        token_field: Option<&str>,
        temperature: f64,
    ) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": request.system_prompt},
                {"role": "user", "content": request.user_prompt},
            ],
            "temperature": temperature,
            "response_format": {"type": "json_object"},
        });

        if let (Some(field), Some(max_tokens)) = (token_field, request.max_tokens) {
            body[field] = json!(max_tokens);
        }

        body
    }

    /// Issue one request variant and parse the success body.
    async fn send_attempt(
        &self,
        request_id: &str,
        body: &Value,
        token_field: Option<&str>,
        temperature: f64,
    ) -> Result<Value, AppError> {
        let api_key = self.api_key.as_ref().ok_or(AppError::NotConfigured)?;

        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", api_key)
            .parse()
            .map_err(|_| AppError::Config("API key contains invalid header characters".into()))?;
        headers.insert(AUTHORIZATION, auth_value);

        let start = Instant::now();
        let response = self
            .client
            .post(&self.chat_url)
            .headers(headers)
            .json(body)
            .send()
            .await?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let status = response.status();
        let field_name = token_field.unwrap_or("none");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let preview: String = text.chars().take(200).collect();
            error!(
                request_id,
                status = status.as_u16(),
                duration_ms,
                token_field = field_name,
                temperature,
                body = %preview,
                "Completion attempt failed"
            );
            return Err(AppError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        info!(
            request_id,
            status = status.as_u16(),
            duration_ms,
            token_field = field_name,
            temperature,
            "Completion attempt succeeded"
        );

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl CompletionBackend for OpenAiGateway {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Walk the negotiation matrix sequentially: token fields in the outer
    /// loop, temperature candidates in the inner loop, one request per pair.
    /// Attempts are never issued concurrently, so attempt ordering and error
    /// classification stay deterministic.
    async fn complete(&self, request: CompletionRequest) -> Result<Value, AppError> {
        if !self.is_configured() {
            return Err(AppError::NotConfigured);
        }

        let request_id = Uuid::new_v4().to_string();
        let temperatures = temperature_candidates(request.temperature);
        let mut last_error = AppError::NotConfigured;

        for token_field in TOKEN_FIELDS {
            for &temperature in &temperatures {
                let body = self.build_body(&request, token_field, temperature);
                match self
                    .send_attempt(&request_id, &body, token_field, temperature)
                    .await
                {
                    Ok(json) => return Ok(json),
                    Err(err) => {
                        let action = classify_rejection(&err, token_field, true);
                        last_error = err;
                        match action {
                            RejectionAction::NextTemperature => continue,
                            RejectionAction::NextField => break,
                            RejectionAction::Abort => return Err(last_error),
                        }
                    }
                }
            }
        }

        Err(last_error)
    }
}
