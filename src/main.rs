use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use dynamic_agent::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "dynamic-agent")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Answer from a built-in offline backend instead of Gemini
    #[arg(long, global = true)]
    mock_backend: bool,

    /// Disable colours and syntax highlighting
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    // Logs go to stderr; stdout carries the rendered conversation.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let color = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    let command = cli.command.unwrap_or(Commands::Chat);

    let output = match command {
        // No backend call, no credential.
        Commands::Examples => {
            let container = Container::new(ContainerConfig::from_env(true, color))?;
            Router::new(&container).route(Commands::Examples).await?
        }
        command => {
            let container = Container::new(ContainerConfig::from_env(cli.mock_backend, color))?;
            debug!("Backend model: {}", container.model_name());
            Router::new(&container).route(command).await?
        }
    };

    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_chat() {
        let cli = Cli::try_parse_from(["dynamic-agent"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn ask_requires_prompt_or_example() {
        assert!(Cli::try_parse_from(["dynamic-agent", "ask"]).is_err());
        assert!(Cli::try_parse_from(["dynamic-agent", "ask", "hello"]).is_ok());
        assert!(Cli::try_parse_from(["dynamic-agent", "ask", "--example", "2"]).is_ok());
        assert!(Cli::try_parse_from(["dynamic-agent", "ask", "hi", "--example", "2"]).is_err());
    }

    #[test]
    fn ask_accepts_output_formats() {
        let cli = Cli::try_parse_from(["dynamic-agent", "--mock-backend", "ask", "hi", "-f", "json"])
            .unwrap();
        assert!(cli.mock_backend);
        assert!(matches!(
            cli.command,
            Some(Commands::Ask {
                format: dynamic_agent::OutputFormat::Json,
                ..
            })
        ));
    }
}
