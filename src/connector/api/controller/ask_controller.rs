use anyhow::Result;

use crate::cli::OutputFormat;
use crate::{ConversationEntry, DisplaySurface, MarkdownSurface};

use super::super::spinner::thinking_spinner;
use super::super::Container;

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn ask(
        &self,
        prompt: Option<String>,
        example: Option<usize>,
        format: OutputFormat,
    ) -> Result<String> {
        let mut session = self.container.chat_session();

        let spinner = thinking_spinner();
        let result = match (prompt, example) {
            (_, Some(number)) => session.submit_example(number).await,
            (Some(prompt), None) => session.submit(&prompt).await,
            (None, None) => {
                spinner.finish_and_clear();
                anyhow::bail!("Nothing to ask: pass a prompt or --example <N>");
            }
        };
        spinner.finish_and_clear();

        let entry = result?;
        self.format_entry(entry, format)
    }

    fn format_entry(&self, entry: &ConversationEntry, format: OutputFormat) -> Result<String> {
        let render = self.container.render_use_case();
        let output = match format {
            OutputFormat::Json => serde_json::to_string_pretty(entry.content())?,
            OutputFormat::Markdown => {
                let mut surface = MarkdownSurface::new();
                render_reply_only(&render, entry, &mut surface);
                surface.into_string()
            }
            OutputFormat::Terminal => {
                let mut surface = self.container.terminal_surface();
                render_reply_only(&render, entry, &mut surface);
                surface.into_string()
            }
        };
        Ok(output.trim_end().to_string())
    }
}

fn render_reply_only(
    render: &crate::RenderUseCase,
    entry: &ConversationEntry,
    surface: &mut dyn DisplaySurface,
) {
    match entry.content().as_reply() {
        Some(reply) => render.render_reply(reply, surface),
        None => render.render_entry(entry, surface),
    }
}
