//! Session state record.

use std::fmt;
use std::path::PathBuf;

use crate::api::VideoInfo;
use crate::error::Failure;

/// Whether a network operation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationStatus {
    #[default]
    Idle,
    Busy,
}

/// The operation currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchInfo,
    /// Covers both the binary download and saving the result.
    Download,
}

/// Phase shown to the user, derived from the state fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FetchingInfo,
    InfoReady,
    Downloading,
    Error,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::FetchingInfo => write!(f, "fetching info"),
            Phase::InfoReady => write!(f, "info ready"),
            Phase::Downloading => write!(f, "downloading"),
            Phase::Error => write!(f, "error"),
        }
    }
}

/// Everything the session knows. Owned by the session actor; the shell only
/// ever sees clones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Submission URL as typed. Empty means nothing submitted.
    pub url: String,

    /// Metadata from the last successful fetch.
    pub info: Option<VideoInfo>,

    /// The URL the current info fetch was issued for. Downloads use this,
    /// not `url`, so editing the URL never changes what gets downloaded.
    pub info_url: Option<String>,

    /// Failure from the last attempt.
    pub error: Option<Failure>,

    /// Operation in flight, if any.
    pub in_flight: Option<Operation>,

    /// Where the last download was saved.
    pub last_saved: Option<PathBuf>,
}

impl SessionState {
    pub fn status(&self) -> OperationStatus {
        if self.in_flight.is_some() {
            OperationStatus::Busy
        } else {
            OperationStatus::Idle
        }
    }

    pub fn is_busy(&self) -> bool {
        self.status() == OperationStatus::Busy
    }

    pub fn phase(&self) -> Phase {
        match self.in_flight {
            Some(Operation::FetchInfo) => Phase::FetchingInfo,
            Some(Operation::Download) => Phase::Downloading,
            None if self.error.is_some() => Phase::Error,
            None if self.info.is_some() => Phase::InfoReady,
            None => Phase::Idle,
        }
    }

    /// "Get Info" is enabled.
    pub fn can_request_info(&self) -> bool {
        !self.is_busy() && !self.url.is_empty()
    }

    /// "Download" is enabled.
    pub fn can_request_download(&self) -> bool {
        !self.is_busy() && self.info.is_some()
    }

    /// True when the URL was edited after the current info was fetched.
    pub fn url_edited_since_info(&self) -> bool {
        match &self.info_url {
            Some(info_url) => self.info.is_some() && info_url != &self.url,
            None => false,
        }
    }
}
