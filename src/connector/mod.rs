//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Model backend (Gemini over HTTPS, plus an offline mock)
//! - Display surfaces (ANSI terminal, Markdown)
//! - CLI wiring (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
