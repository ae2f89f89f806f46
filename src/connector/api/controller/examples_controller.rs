use anyhow::Result;

use crate::ExamplePrompt;

pub struct ExamplesController;

impl ExamplesController {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(&self) -> Result<String> {
        Ok(format_examples(ExamplePrompt::all()))
    }
}

impl Default for ExamplesController {
    fn default() -> Self {
        Self::new()
    }
}

/// Numbered cards, also shown on the chat welcome screen.
pub fn format_examples(examples: &[ExamplePrompt]) -> String {
    let mut output = String::new();
    for (i, example) in examples.iter().enumerate() {
        output.push_str(&format!("  [{}] {}\n", i + 1, example.title));
        output.push_str(&format!("      {}\n", example.blurb));
        output.push_str(&format!("      \"{}\"\n", example.prompt));
    }
    output
}
