//! Terminal front end: interactive prompt and one-shot mode.
//!
//! The shell never touches session state directly. It sends actions through
//! the [`SessionHandle`] and renders the snapshots the actor publishes.

use std::io::Write;

use indicatif::ProgressBar;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{Error, Failure, Result};
use crate::output::{
    busy_message, create_spinner, print_help, print_info, print_outcome, print_state,
    print_video_info, print_warning,
};
use crate::session::{SessionHandle, SessionState};

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Url(String),
    Info,
    Download,
    Status,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parse one prompt line. A bare `http(s)://` URL is shorthand for `url <URL>`.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }

    if line.starts_with("http://") || line.starts_with("https://") {
        return Command::Url(line.to_string());
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "url" | "u" => Command::Url(rest.to_string()),
        "info" | "i" => Command::Info,
        "download" | "d" => Command::Download,
        "status" | "s" => Command::Status,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Explain why a request was dropped.
fn explain_rejection(state: &SessionState, command: &Command) -> &'static str {
    if state.is_busy() {
        return "Busy: wait for the current operation to finish";
    }
    match command {
        Command::Info => "Set a URL first (url <URL>)",
        _ => "Fetch video info first (info)",
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Run the interactive prompt until `quit` or end of input.
///
/// Input keeps being read while an operation is in flight, so requests made
/// meanwhile reach the session and are dropped by its busy guard.
pub async fn run_interactive(handle: &SessionHandle) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut updates = handle.subscribe();
    let mut spinner: Option<ProgressBar> = None;
    let mut awaiting_outcome = false;

    print_help();
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                let command = parse_command(&line);
                match &command {
                    Command::Quit => break,
                    Command::Empty => {}
                    Command::Help => print_help(),
                    Command::Status => print_state(&handle.snapshot()),
                    Command::Url(url) => {
                        handle.edit_url(url.clone()).await?;
                        if url.is_empty() {
                            print_info("URL cleared");
                        }
                    }
                    Command::Info | Command::Download => {
                        let accepted = if command == Command::Info {
                            handle.request_info().await?
                        } else {
                            handle.request_download().await?
                        };

                        if accepted {
                            awaiting_outcome = true;
                        } else {
                            print_warning(explain_rejection(&handle.snapshot(), &command));
                        }
                    }
                    Command::Unknown(input) => {
                        print_warning(&format!("Unknown command: {} (type `help`)", input));
                    }
                }

                if !awaiting_outcome {
                    prompt();
                }
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }

                let state = updates.borrow_and_update().clone();
                match state.in_flight {
                    Some(operation) if spinner.is_none() => {
                        spinner = Some(create_spinner(busy_message(operation)));
                    }
                    None => {
                        if let Some(spinner) = spinner.take() {
                            spinner.finish_and_clear();
                        }
                        if awaiting_outcome {
                            awaiting_outcome = false;
                            print_outcome(&state);
                            prompt();
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    Ok(())
}

/// Options for one-shot mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneShotOptions {
    /// Download without confirmation.
    pub assume_yes: bool,
    /// Stop after printing the info.
    pub info_only: bool,
}

/// Fetch info for `url`, then optionally download it.
///
/// Returns the failure shown to the user, if any.
pub async fn run_one_shot(
    handle: &SessionHandle,
    url: &str,
    options: OneShotOptions,
) -> Result<Option<Failure>> {
    if url.is_empty() {
        return Err(Error::Config("No video URL given".to_string()));
    }

    handle.edit_url(url).await?;
    handle.request_info().await?;
    let state = wait_with_spinner(handle).await?;

    if let Some(failure) = state.error {
        print_outcome(&state);
        return Ok(Some(failure));
    }

    if let Some(info) = &state.info {
        print_video_info(info);
    }

    if options.info_only {
        return Ok(None);
    }

    if !options.assume_yes && !confirm("Download this video? [y/N] ").await? {
        print_info("Download skipped");
        return Ok(None);
    }

    handle.request_download().await?;
    let state = wait_with_spinner(handle).await?;
    print_outcome(&state);

    Ok(state.error)
}

/// Wait for the in-flight operation to settle, showing a spinner meanwhile.
async fn wait_with_spinner(handle: &SessionHandle) -> Result<SessionState> {
    let spinner = handle
        .snapshot()
        .in_flight
        .map(|operation| create_spinner(busy_message(operation)));

    let state = handle.settled().await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    state
}

async fn confirm(question: &str) -> Result<bool> {
    print!("{}", question);
    let _ = std::io::stdout().flush();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("info"), Command::Info);
        assert_eq!(parse_command("  DOWNLOAD "), Command::Download);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("status"), Command::Status);
        assert_eq!(parse_command(""), Command::Empty);
        assert_eq!(parse_command("?"), Command::Help);
    }

    #[test]
    fn test_parse_url_forms() {
        assert_eq!(
            parse_command("url https://youtube.com/watch?v=abc"),
            Command::Url("https://youtube.com/watch?v=abc".to_string())
        );
        assert_eq!(
            parse_command("https://youtube.com/watch?v=abc"),
            Command::Url("https://youtube.com/watch?v=abc".to_string())
        );
        assert_eq!(parse_command("url"), Command::Url(String::new()));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("fetch everything"),
            Command::Unknown("fetch everything".to_string())
        );
    }

    #[test]
    fn test_rejection_reasons() {
        let idle = SessionState::default();
        assert_eq!(
            explain_rejection(&idle, &Command::Info),
            "Set a URL first (url <URL>)"
        );
        assert_eq!(
            explain_rejection(&idle, &Command::Download),
            "Fetch video info first (info)"
        );

        let busy = SessionState {
            in_flight: Some(crate::session::Operation::FetchInfo),
            ..Default::default()
        };
        assert!(explain_rejection(&busy, &Command::Download).starts_with("Busy"));
    }
}
