use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, ChatController, ExamplesController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    chat_controller: ChatController<'a>,
    examples_controller: ExamplesController,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            chat_controller: ChatController::new(container),
            examples_controller: ExamplesController::new(),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Chat => self.chat_controller.run().await,
            Commands::Ask {
                prompt,
                example,
                format,
            } => self.ask_controller.ask(prompt, example, format).await,
            Commands::Examples => self.examples_controller.list().await,
        }
    }
}
