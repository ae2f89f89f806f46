use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use crate::application::use_cases::prompt::compose_prompt;
use crate::application::ChatClient;
use crate::domain::{AgentReply, Completion, ConversationEntry, DomainError, ErrorResponse};

/// Upper bound on one backend round trip. After this the call is abandoned.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_secs(60);

/// Turns a user prompt plus recent history into exactly one backend call and
/// classifies the outcome.
///
/// `execute` has no error channel: every failure is folded into an
/// [`ErrorResponse`] so the conversation can carry on.
pub struct RespondUseCase {
    client: Arc<dyn ChatClient>,
}

impl RespondUseCase {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    pub async fn execute(&self, user_prompt: &str, history: &[ConversationEntry]) -> AgentReply {
        let start_time = Instant::now();

        let reply = match self.try_execute(user_prompt, history).await {
            Ok(reply) => reply,
            Err(err) => {
                if err.is_unexpected() {
                    error!("RespondUseCase: unexpected failure: {err}");
                } else {
                    warn!("RespondUseCase: {err}");
                }
                AgentReply::Error(ErrorResponse::from(err))
            }
        };

        info!(
            "Reply ({}) from {} in {:.2}s",
            reply
                .response_type()
                .map(|t| t.as_str())
                .unwrap_or(if reply.is_error() { "error" } else { "text" }),
            self.client.model_name(),
            start_time.elapsed().as_secs_f64()
        );

        reply
    }

    async fn try_execute(
        &self,
        user_prompt: &str,
        history: &[ConversationEntry],
    ) -> Result<AgentReply, DomainError> {
        let prompt = compose_prompt(user_prompt, history);
        debug!(
            "Composed prompt: {} chars, {} history entries available",
            prompt.len(),
            history.len()
        );

        let completion = tokio::time::timeout(RESPONSE_TIMEOUT, self.client.complete_json(&prompt))
            .await
            .map_err(|_| DomainError::Timeout(RESPONSE_TIMEOUT.as_secs()))??;

        match completion {
            Completion::Blocked { reason } => Err(DomainError::safety_block(reason)),
            Completion::Text(text) => {
                debug!("Raw backend response: {text}");
                AgentReply::parse(&text)
            }
        }
    }
}
