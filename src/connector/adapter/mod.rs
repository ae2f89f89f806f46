mod gemini_client;
mod markdown_surface;
mod mock_chat_client;
mod terminal_surface;

pub use gemini_client::*;
pub use markdown_surface::*;
pub use mock_chat_client::*;
pub use terminal_surface::*;
