pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::{Commands, OutputFormat};

pub use application::{
    compose_prompt, humanize_key, render_history, ChatClient, ChatSession, DisplaySurface,
    RenderUseCase, RespondUseCase, HISTORY_WINDOW, RESPONSE_TIMEOUT,
};

pub use connector::{
    Container, ContainerConfig, GeminiClient, MarkdownSurface, MockChatClient, Router,
    TerminalSurface,
};

pub use domain::{
    AgentReply, CodePayload, Completion, ConceptNote, Conversation, ConversationEntry,
    DomainError, EntryContent, ErrorResponse, ExamplePrompt, Explanation, ResponseObject,
    ResponseType, Role,
};
