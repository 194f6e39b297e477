//! Pure state transitions.
//!
//! [`transition`] maps `(state, event)` to `(state, effect)`. It performs no
//! I/O; the actor executes the returned [`Effect`] and feeds the outcome back
//! in as a settle event.

use std::path::PathBuf;

use crate::api::VideoInfo;
use crate::error::{Failure, Result};
use crate::save::suggested_filename;
use crate::session::state::{Operation, SessionState};

/// Something the user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Overwrite the submission URL.
    EditUrl(String),
    /// "Get Info".
    RequestInfo,
    /// "Download".
    RequestDownload,
}

/// Input to the state machine.
#[derive(Debug)]
pub enum Event {
    Action(Action),
    InfoSettled(Result<VideoInfo>),
    DownloadSettled(Result<Vec<u8>>),
    SaveSettled(Result<PathBuf>),
}

impl From<Action> for Event {
    fn from(action: Action) -> Self {
        Event::Action(action)
    }
}

/// Side effect requested by a transition.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    FetchMetadata { url: String },
    FetchDownload { url: String },
    Save { artifact: Vec<u8>, filename: String },
}

impl Effect {
    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }
}

/// Apply one event.
///
/// `extension` is appended to the video title to form the saved filename.
pub fn transition(
    mut state: SessionState,
    event: Event,
    extension: &str,
) -> (SessionState, Effect) {
    let effect = match event {
        Event::Action(Action::EditUrl(url)) => {
            // Metadata and error are left alone until the next request
            state.url = url;
            Effect::None
        }

        Event::Action(Action::RequestInfo) => {
            if state.url.is_empty() || state.is_busy() {
                tracing::debug!("Ignoring info request (empty URL or busy)");
                return (state, Effect::None);
            }

            state.info = None;
            state.info_url = Some(state.url.clone());
            state.error = None;
            state.last_saved = None;
            state.in_flight = Some(Operation::FetchInfo);
            Effect::FetchMetadata {
                url: state.url.clone(),
            }
        }

        Event::Action(Action::RequestDownload) => {
            if state.is_busy() {
                tracing::debug!("Ignoring download request (busy)");
                return (state, Effect::None);
            }

            let url = match (&state.info, &state.info_url) {
                (Some(_), Some(info_url)) => info_url.clone(),
                _ => {
                    tracing::debug!("Ignoring download request (no video info)");
                    return (state, Effect::None);
                }
            };

            if state.url_edited_since_info() {
                tracing::warn!(
                    "URL was edited after fetching info; downloading {} \
                     (request info again to switch)",
                    url
                );
            }

            state.error = None;
            state.last_saved = None;
            state.in_flight = Some(Operation::Download);
            Effect::FetchDownload { url }
        }

        Event::InfoSettled(result) => {
            if state.in_flight != Some(Operation::FetchInfo) {
                tracing::warn!("Dropping info result with no fetch in flight");
                return (state, Effect::None);
            }

            state.in_flight = None;
            let fetched_url = state.info_url.take().unwrap_or_default();
            match result {
                Ok(info) => {
                    tracing::info!("Fetched info for {}: {}", fetched_url, info.title);
                    state.info = Some(info);
                    state.info_url = Some(fetched_url);
                }
                Err(e) => {
                    tracing::debug!("Info fetch for {} failed: {}", fetched_url, e);
                    state.error = Some(Failure::InfoFetchFailed);
                }
            }
            Effect::None
        }

        Event::DownloadSettled(result) => {
            if state.in_flight != Some(Operation::Download) {
                tracing::warn!("Dropping download result with no download in flight");
                return (state, Effect::None);
            }

            match result {
                Ok(artifact) if !artifact.is_empty() => {
                    let title = state
                        .info
                        .as_ref()
                        .map(|info| info.title.as_str())
                        .unwrap_or_default();
                    // Still busy until the save settles
                    Effect::Save {
                        filename: suggested_filename(title, extension),
                        artifact,
                    }
                }
                Ok(_) => {
                    tracing::debug!("Download returned an empty payload");
                    state.in_flight = None;
                    state.error = Some(Failure::DownloadFailed);
                    Effect::None
                }
                Err(e) => {
                    tracing::debug!("Download failed: {}", e);
                    state.in_flight = None;
                    state.error = Some(Failure::DownloadFailed);
                    Effect::None
                }
            }
        }

        Event::SaveSettled(result) => {
            if state.in_flight != Some(Operation::Download) {
                tracing::warn!("Dropping save result with no download in flight");
                return (state, Effect::None);
            }

            state.in_flight = None;
            match result {
                Ok(path) => state.last_saved = Some(path),
                Err(e) => {
                    tracing::debug!("Saving download failed: {}", e);
                    state.error = Some(Failure::DownloadFailed);
                }
            }
            Effect::None
        }
    };

    (state, effect)
}
