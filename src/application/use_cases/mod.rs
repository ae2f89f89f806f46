mod chat_session;
pub mod prompt;
mod render;
mod respond;

pub use chat_session::*;
pub use prompt::{compose_prompt, render_history, HISTORY_WINDOW};
pub use render::*;
pub use respond::*;
