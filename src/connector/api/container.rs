use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::debug;

use crate::application::{ChatClient, ChatSession, RenderUseCase};
use crate::connector::{GeminiClient, MockChatClient, TerminalSurface, API_KEY_ENV};

pub struct ContainerConfig {
    /// Credential read once at start-up; `None` when the variable is unset or blank.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Answer from [`MockChatClient`] instead of the hosted model. No key needed.
    pub mock_backend: bool,
    pub color: bool,
}

impl ContainerConfig {
    /// Resolve backend settings from the environment (see [`GeminiClient::configured_api_key`]).
    pub fn from_env(mock_backend: bool, color: bool) -> Self {
        Self {
            api_key: GeminiClient::configured_api_key(),
            model: GeminiClient::configured_model(),
            base_url: GeminiClient::configured_base_url(),
            mock_backend,
            color,
        }
    }
}

pub struct Container {
    client: Arc<dyn ChatClient>,
    config: ContainerConfig,
}

impl Container {
    /// Build the backend client. Refuses to start without a credential unless
    /// the mock backend was requested.
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let client: Arc<dyn ChatClient> = if config.mock_backend {
            debug!("Using mock chat backend");
            Arc::new(MockChatClient::new())
        } else {
            let Some(api_key) = config.api_key.as_deref() else {
                bail!(
                    "Gemini API key not found. Set the {API_KEY_ENV} environment variable \
                     (or pass --mock-backend to run offline)."
                );
            };
            debug!(
                "Using Gemini backend {} at {}",
                config.model, config.base_url
            );
            Arc::new(GeminiClient::new(
                api_key,
                config.model.clone(),
                config.base_url.clone(),
            ))
        };

        Ok(Self { client, config })
    }

    /// Wire an explicit client, e.g. a scripted mock in tests.
    pub fn with_client(client: Arc<dyn ChatClient>, config: ContainerConfig) -> Self {
        Self { client, config }
    }

    /// A fresh session with an empty conversation.
    pub fn chat_session(&self) -> ChatSession {
        ChatSession::new(self.client.clone())
    }

    pub fn render_use_case(&self) -> RenderUseCase {
        RenderUseCase::new()
    }

    pub fn terminal_surface(&self) -> TerminalSurface {
        TerminalSurface::new(self.config.color)
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    pub fn mock_backend(&self) -> bool {
        self.config.mock_backend
    }
}
