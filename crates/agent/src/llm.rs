use async_trait::async_trait;
use repdash_core::AiConfig;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GatewayError;

/// Seam between the gateway and the upstream completion transport.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one prompt upstream and return the raw answer text.
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// OpenAI-compatible chat-completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

/// HTTP transport for any OpenAI-compatible chat-completion endpoint.
///
/// Credentials are resolved on every call, not at construction: the client
/// can be built against an unconfigured [`AiConfig`] and will report the gap
/// per request without ever dialing out.
pub struct ChatClient {
    http: reqwest::Client,
    config: AiConfig,
}

#[derive(Debug)]
struct ResolvedTarget<'a> {
    api_key: &'a str,
    api_url: &'a str,
    model: &'a str,
}

impl ChatClient {
    pub fn new(config: AiConfig) -> Self {
        Self { http: reqwest::Client::new(), config }
    }

    /// All three settings are mandatory and have no defaults. Blank values
    /// count as unset.
    fn target(&self) -> Result<ResolvedTarget<'_>, GatewayError> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GatewayError::Configuration("ai.api_key is not set".to_string()))?;

        let api_url = self
            .config
            .api_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| GatewayError::Configuration("ai.api_url is not set".to_string()))?;

        let model = self
            .config
            .model
            .as_deref()
            .filter(|model| !model.trim().is_empty())
            .ok_or_else(|| GatewayError::Configuration("ai.model is not set".to_string()))?;

        Ok(ResolvedTarget { api_key, api_url, model })
    }
}

#[async_trait]
impl CompletionClient for ChatClient {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let target = self.target()?;

        let request = ChatRequest {
            model: target.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        };

        debug!(
            event_name = "agent.completion.dispatch",
            model = target.model,
            prompt_bytes = prompt.len(),
            "dispatching completion request"
        );

        let response = self
            .http
            .post(target.api_url)
            .bearer_auth(target.api_key)
            .json(&request)
            .send()
            .await
            .map_err(GatewayError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(GatewayError::Transport)?;

        if !status.is_success() {
            return Err(GatewayError::Upstream { status: status.as_u16(), body });
        }

        extract_answer(&body)
    }
}

/// Pull the first choice's message content out of a 2xx body and trim it.
fn extract_answer(body: &str) -> Result<String, GatewayError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|error| GatewayError::MalformedResponse(error.to_string()))?;

    let first = parsed.choices.into_iter().next().ok_or_else(|| {
        GatewayError::MalformedResponse("response contained no choices".to_string())
    })?;

    Ok(first.message.content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use repdash_core::AiConfig;

    use crate::error::GatewayError;

    use super::{extract_answer, ChatClient, ChatMessage, ChatRequest};

    fn configured() -> AiConfig {
        AiConfig {
            api_key: Some("sk-test".to_string().into()),
            api_url: Some("https://api.groq.com/openai/v1/chat/completions".to_string()),
            model: Some("llama-3.3-70b-versatile".to_string()),
        }
    }

    #[test]
    fn request_body_matches_chat_completion_wire_format() {
        let request = ChatRequest {
            model: "llama-3.3-70b-versatile",
            messages: vec![ChatMessage { role: "user", content: "How many deals?" }],
        };

        let serialized = serde_json::to_value(&request).expect("request should serialize");

        assert_eq!(
            serialized,
            serde_json::json!({
                "model": "llama-3.3-70b-versatile",
                "messages": [ { "role": "user", "content": "How many deals?" } ]
            })
        );
    }

    #[test]
    fn extract_answer_returns_trimmed_first_choice() {
        let body = r#"{
            "choices": [
                { "message": { "role": "assistant", "content": "  Two deals closed.\n" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }"#;

        let answer = extract_answer(body).expect("answer should be extracted");
        assert_eq!(answer, "Two deals closed.");
    }

    #[test]
    fn extract_answer_rejects_bodies_without_choices() {
        let error = extract_answer(r#"{ "choices": [] }"#).expect_err("no choices");
        assert!(matches!(error, GatewayError::MalformedResponse(ref detail) if detail.contains("no choices")));

        let error = extract_answer(r#"{ "object": "chat.completion" }"#).expect_err("no choices");
        assert!(matches!(error, GatewayError::MalformedResponse(_)));
    }

    #[test]
    fn extract_answer_rejects_non_json_bodies() {
        let error = extract_answer("upstream had a bad day").expect_err("not json");
        assert!(matches!(error, GatewayError::MalformedResponse(_)));
    }

    #[test]
    fn extract_answer_rejects_choices_without_message_content() {
        let error =
            extract_answer(r#"{ "choices": [ { "message": { "role": "assistant" } } ] }"#)
                .expect_err("content missing");
        assert!(matches!(error, GatewayError::MalformedResponse(_)));
    }

    #[test]
    fn target_requires_every_setting() {
        let unset = ChatClient::new(AiConfig { api_key: None, api_url: None, model: None });
        let error = unset.target().expect_err("nothing configured");
        assert!(matches!(error, GatewayError::Configuration(ref detail) if detail.contains("ai.api_key")));

        let mut config = configured();
        config.api_url = None;
        let error = ChatClient::new(config).target().expect_err("url missing");
        assert!(matches!(error, GatewayError::Configuration(ref detail) if detail.contains("ai.api_url")));

        let mut config = configured();
        config.model = Some("   ".to_string());
        let error = ChatClient::new(config).target().expect_err("blank model counts as unset");
        assert!(matches!(error, GatewayError::Configuration(ref detail) if detail.contains("ai.model")));
    }

    #[test]
    fn target_resolves_when_fully_configured() {
        let client = ChatClient::new(configured());
        let target = client.target().expect("fully configured");

        assert_eq!(target.api_key, "sk-test");
        assert_eq!(target.api_url, "https://api.groq.com/openai/v1/chat/completions");
        assert_eq!(target.model, "llama-3.3-70b-versatile");
    }
}
