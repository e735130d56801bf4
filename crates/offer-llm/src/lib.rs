//! LLM call boundary: backend selection and the two concrete clients.
//!
//! The backend is chosen exactly once, from the configuration, and never
//! re-decided per call: a configured `GEMINI_BASE_URL` selects the
//! OpenAI-compatible [`GatewayClient`], otherwise the direct [`GeminiClient`]
//! is used. A missing credential is a configuration error raised here,
//! before any network activity.

mod gateway;
mod gemini;

pub use gateway::{GatewayClient, DEFAULT_GATEWAY_MODEL};
pub use gemini::{GeminiClient, DEFAULT_GEMINI_MODEL};

use tracing::info;

use offer_config::AppConfig;
use offer_core::{AgentError, LlmBackend};

/// Builds the LLM backend for this process from the resolved configuration.
pub fn backend_from_config(config: &AppConfig) -> Result<Box<dyn LlmBackend>, AgentError> {
    let api_key = config.api_key.as_deref().ok_or(AgentError::MissingApiKey)?;

    match config.base_url.as_deref() {
        Some(base_url) => {
            let client = GatewayClient::new(api_key, base_url, config.model.as_deref());
            info!("LLM backend: gateway at {} ({})", base_url, client.model());
            Ok(Box::new(client))
        }
        None => {
            let client = GeminiClient::new(api_key, config.model.as_deref());
            info!("LLM backend: direct Gemini ({})", client.model());
            Ok(Box::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_a_configuration_error() {
        let config = AppConfig::default();
        let err = backend_from_config(&config).err().expect("expected error");
        assert!(matches!(err, AgentError::MissingApiKey));
    }

    #[test]
    fn base_url_selects_the_gateway_model_default() {
        let client = GatewayClient::new("key", "https://gateway.example/v1", None);
        assert_eq!(client.model(), DEFAULT_GATEWAY_MODEL);

        let client = GeminiClient::new("key", None);
        assert_eq!(client.model(), DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn explicit_model_overrides_defaults() {
        let client = GeminiClient::new("key", Some("gemini-2.5-flash"));
        assert_eq!(client.model(), "gemini-2.5-flash");
    }
}
