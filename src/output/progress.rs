//! Progress indicators.

use indicatif::{ProgressBar, ProgressStyle};

use crate::session::Operation;

/// Create a spinner for long-running operations.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Spinner label for the operation in flight.
pub fn busy_message(operation: Operation) -> &'static str {
    match operation {
        Operation::FetchInfo => "Processing...",
        Operation::Download => "Downloading (this may take time)...",
    }
}
