//! Environment configuration for the analysis core.
//!
//! Read once at startup and immutable thereafter. A missing API key is a
//! supported "not configured" state, not a startup failure: the analyzer
//! degrades to the heuristic path.

use std::env;

/// Default completion model when `OPENAI_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Immutable AI configuration, resolved from the environment at process start.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Credential for the completion service. `None` means the model path is
    /// disabled and every analysis uses the heuristic fallback.
    pub openai_api_key: Option<String>,
    /// Completion model identifier.
    pub model: String,
}

impl AiConfig {
    /// Load the configuration from the environment.
    ///
    /// Blank or whitespace-only values are treated as unset.
    pub fn from_env() -> Self {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let model = env::var("OPENAI_MODEL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            openai_api_key,
            model,
        }
    }

    /// Whether the model path is enabled.
    pub fn is_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_not_configured() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", None::<&str>),
                ("OPENAI_MODEL", None::<&str>),
            ],
            || {
                let config = AiConfig::from_env();
                assert!(!config.is_configured());
                assert_eq!(config.model, DEFAULT_MODEL);
            },
        );
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        temp_env::with_vars([("OPENAI_API_KEY", Some("   "))], || {
            let config = AiConfig::from_env();
            assert!(!config.is_configured());
        });
    }

    #[test]
    fn test_model_override_is_trimmed() {
        temp_env::with_vars(
            [
                ("OPENAI_API_KEY", Some("sk-test")),
                ("OPENAI_MODEL", Some("  gpt-4o  ")),
            ],
            || {
                let config = AiConfig::from_env();
                assert!(config.is_configured());
                assert_eq!(config.model, "gpt-4o");
            },
        );
    }
}
