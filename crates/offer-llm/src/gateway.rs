//! OpenAI-compatible gateway client.
//!
//! Used when a base URL is configured (e.g. an AI gateway fronting Gemini).
//! Any endpoint speaking the OpenAI chat-completions protocol works.

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::info;

use offer_core::{AgentError, LlmBackend};

/// Default model when `GEMINI_MODEL` is not set and a gateway is in use.
pub const DEFAULT_GATEWAY_MODEL: &str = "gemini-2.0-flash";

fn llm_err(e: impl ToString) -> AgentError {
    AgentError::Llm(e.to_string())
}

pub struct GatewayClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GatewayClient {
    pub fn new(api_key: &str, base_url: &str, model: Option<&str>) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(base_url);

        Self {
            client: Client::with_config(config),
            model: model.unwrap_or(DEFAULT_GATEWAY_MODEL).to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmBackend for GatewayClient {
    async fn call(&self, system_prompt: &str, user_content: &str) -> Result<String, AgentError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(system_prompt)
                        .build()
                        .map_err(llm_err)?,
                ),
                ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(user_content)
                        .build()
                        .map_err(llm_err)?,
                ),
            ])
            .build()
            .map_err(llm_err)?;

        let response = self.client.chat().create(request).await.map_err(llm_err)?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AgentError::Llm(format!("Empty response from {}", self.model)))?;

        info!("LLM (gateway/{}): {} chars", self.model, content.len());
        Ok(content.trim().to_string())
    }
}
