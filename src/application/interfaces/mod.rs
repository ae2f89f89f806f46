mod chat_client;
mod display_surface;

pub use chat_client::*;
pub use display_surface::*;
