use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled terminal output with highlighted code
    #[default]
    Terminal,
    /// GitHub-flavoured Markdown
    Markdown,
    /// The raw reply object as JSON
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive chat session (the default)
    Chat,

    /// Send a single prompt and print the reply
    Ask {
        /// Prompt text
        #[arg(required_unless_present = "example", conflicts_with = "example")]
        prompt: Option<String>,

        /// Submit one of the built-in example prompts instead (1-4)
        #[arg(short, long)]
        example: Option<usize>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Terminal)]
        format: OutputFormat,
    },

    /// List the built-in example prompts
    Examples,
}
