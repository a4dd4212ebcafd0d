use repdash_core::{AiConfig, AiContext};
use tracing::debug;

use crate::error::GatewayError;
use crate::llm::{ChatClient, CompletionClient};
use crate::prompt;

/// Front door for AI questions: validates input, renders the prompt, and
/// forwards exactly one completion call.
pub struct AiGateway {
    client: Box<dyn CompletionClient>,
}

impl AiGateway {
    pub fn new(config: AiConfig) -> Self {
        Self::with_client(Box::new(ChatClient::new(config)))
    }

    /// Swap the transport. Lets tests stub the upstream without a server.
    pub fn with_client(client: Box<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Answer a free-text question against the supplied dataset context.
    ///
    /// The question is trimmed before validation and before it enters the
    /// prompt. A single attempt is made upstream; failures map straight to
    /// [`GatewayError`] with no retry.
    pub async fn answer(
        &self,
        question: &str,
        context: &AiContext<'_>,
    ) -> Result<String, GatewayError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(GatewayError::EmptyQuestion);
        }

        let prompt = prompt::render(question, context);
        debug!(
            event_name = "agent.answer.forwarding",
            prompt_bytes = prompt.len(),
            "forwarding question to the completion API"
        );

        self.client.complete(&prompt).await
    }
}
