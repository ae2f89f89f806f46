use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::{ChatSession, DomainError, ExamplePrompt, TerminalSurface};

use super::super::spinner::thinking_spinner;
use super::super::Container;
use super::examples_controller::format_examples;

const WELCOME_TITLE: &str = "What can I help with?";
const INPUT_PROMPT: &str = "› ";
const HELP: &str = "\
Commands:
  /1 .. /4     submit an example prompt
  /examples    list the example prompts
  /history     show the whole conversation again
  /clear       clear the conversation
  /help        show this help
  /quit        leave the chat";

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Empty,
    Prompt(String),
    Example(usize),
    Examples,
    History,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return ReplCommand::Empty;
        }

        let Some(command) = trimmed.strip_prefix('/') else {
            return ReplCommand::Prompt(line.trim_end_matches(['\r', '\n']).to_string());
        };

        match command.to_lowercase().as_str() {
            "examples" => ReplCommand::Examples,
            "history" => ReplCommand::History,
            "clear" => ReplCommand::Clear,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            other => match other.parse::<usize>() {
                Ok(number) => ReplCommand::Example(number),
                Err(_) => ReplCommand::Unknown(trimmed.to_string()),
            },
        }
    }
}

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Run the REPL on stdin until `/quit` or end of input.
    pub async fn run(&self) -> Result<String> {
        let mut session = self.container.chat_session();
        let mut surface = self.container.terminal_surface();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        print!("{}", self.welcome());
        if self.container.mock_backend() {
            println!("(offline: answering from the mock backend)\n");
        }

        loop {
            print!("{INPUT_PROMPT}");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };

            match ReplCommand::parse(&line) {
                ReplCommand::Empty => continue,
                ReplCommand::Quit => break,
                ReplCommand::Help => println!("{HELP}\n"),
                ReplCommand::Examples => println!("{}", format_examples(ExamplePrompt::all())),
                ReplCommand::Clear => {
                    session.clear();
                    print!("{}", self.welcome());
                }
                ReplCommand::History => {
                    if session.is_empty() {
                        println!("(no messages yet)\n");
                    } else {
                        self.container
                            .render_use_case()
                            .render_conversation(session.entries(), &mut surface);
                        print!("{}", surface.take());
                    }
                }
                ReplCommand::Example(number) => {
                    let Some(example) = ExamplePrompt::by_number(number) else {
                        println!(
                            "No example #{number}; choose 1-{}.\n",
                            ExamplePrompt::all().len()
                        );
                        continue;
                    };
                    println!("{}", example.prompt);
                    self.submit(&mut session, &mut surface, example.prompt).await;
                }
                ReplCommand::Prompt(prompt) => {
                    self.submit(&mut session, &mut surface, &prompt).await;
                }
                ReplCommand::Unknown(command) => {
                    println!("Unknown command {command}. Type /help for the list.\n");
                }
            }
        }

        Ok("Goodbye.".to_string())
    }

    async fn submit(&self, session: &mut ChatSession, surface: &mut TerminalSurface, prompt: &str) {
        let spinner = thinking_spinner();
        let result = session.submit(prompt).await;
        spinner.finish_and_clear();

        match result {
            Ok(entry) => {
                self.container.render_use_case().render_entry(entry, surface);
                print!("{}", surface.take());
            }
            Err(DomainError::InvalidInput(msg)) => println!("{msg}\n"),
            Err(e) => {
                warn!("Submission failed: {e}");
                println!("{e}\n");
            }
        }
    }

    fn welcome(&self) -> String {
        format!(
            "\n{WELCOME_TITLE}\n\nTry an example (type /1 to /{}):\n{}\nType /help for commands.\n\n",
            ExamplePrompt::all().len(),
            format_examples(ExamplePrompt::all())
        )
    }
}
