//! Rendering of session state.

use console::style;

use crate::api::VideoInfo;
use crate::output::console::{print_error, print_success, print_warning};
use crate::session::{Phase, SessionState};

/// Print the metadata preview.
pub fn print_video_info(info: &VideoInfo) {
    println!();
    println!("{}", style(&info.title).bold());
    println!("  Duration:  {}", info.duration);
    println!("  Thumbnail: {}", info.thumbnail);
    if info.is_playlist {
        print_warning("URL points to a playlist; only a single video is downloaded");
    }
    println!();
}

/// Print the outcome of the operation that just settled.
pub fn print_outcome(state: &SessionState) {
    if let Some(failure) = state.error {
        print_error(failure.message());
        return;
    }

    if let Some(path) = &state.last_saved {
        print_success(&format!("Saved to {}", path.display()));
    } else if let Some(info) = &state.info {
        print_video_info(info);
    }
}

/// Print the full state for the `status` command.
pub fn print_state(state: &SessionState) {
    println!("{}", style("Status:").bold());
    println!("  Phase: {}", phase_label(state.phase()));
    println!(
        "  URL:   {}",
        if state.url.is_empty() {
            "(none)"
        } else {
            &state.url
        }
    );

    if let Some(info) = &state.info {
        println!("  Video: {} ({})", info.title, info.duration);
    }
    if state.url_edited_since_info() {
        if let Some(info_url) = &state.info_url {
            println!(
                "  {}",
                style(format!("Info is for {} (run `info` to refresh)", info_url)).yellow()
            );
        }
    }
    if let Some(failure) = state.error {
        println!("  Error: {}", style(failure.message()).red());
    }
    if let Some(path) = &state.last_saved {
        println!("  Saved: {}", path.display());
    }

    let mut actions = Vec::new();
    if state.can_request_info() {
        actions.push("info");
    }
    if state.can_request_download() {
        actions.push("download");
    }
    let ready = if actions.is_empty() {
        "(none)".to_string()
    } else {
        actions.join(", ")
    };
    println!("  Ready: {}", ready);
}

fn phase_label(phase: Phase) -> String {
    match phase {
        Phase::Error => style(phase.to_string()).red().to_string(),
        Phase::InfoReady => style(phase.to_string()).green().to_string(),
        _ => phase.to_string(),
    }
}
