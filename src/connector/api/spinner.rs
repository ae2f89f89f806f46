use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const THINKING_MESSAGE: &str = "Agent is thinking...";

/// Busy indicator shown while the single backend call is outstanding.
///
/// indicatif draws on stderr and stays hidden when that is not a terminal.
pub fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(THINKING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
