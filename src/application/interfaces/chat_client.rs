use async_trait::async_trait;

use crate::domain::{Completion, DomainError};

/// An interface for sending one prompt to a hosted LLM and receiving its
/// JSON-typed answer.
///
/// Implementors encapsulate transport, serialization, credentials and
/// vendor-specific API details. Consumers (e.g. [`crate::application::RespondUseCase`])
/// remain decoupled from any particular provider or HTTP client library.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `prompt` and ask for `application/json` output.
    ///
    /// A safety refusal is a successful call that yields [`Completion::Blocked`];
    /// credential problems must surface as [`DomainError::Unauthorized`].
    async fn complete_json(&self, prompt: &str) -> Result<Completion, DomainError>;

    fn model_name(&self) -> &str;
}
