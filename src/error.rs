//! Error types for the vidgrab client.

use std::fmt;

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // Service errors
    #[error("Service returned HTTP {status} for {endpoint}")]
    Service { endpoint: String, status: u16 },

    #[error("Malformed service response: {0}")]
    MalformedResponse(String),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // Session errors
    #[error("Session stopped")]
    SessionClosed,

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced to the user.
///
/// Each kind renders as one fixed message no matter what went wrong underneath.
/// The cause is logged where the internal [`Error`] is mapped, never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    InfoFetchFailed,
    DownloadFailed,
}

impl Failure {
    /// The user-facing message for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            Failure::InfoFetchFailed => "Could not fetch video info. Check URL or Backend status.",
            Failure::DownloadFailed => {
                "Download failed. Video might be too long for free tier timeout."
            }
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
