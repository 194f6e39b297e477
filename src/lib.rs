//! vidgrab - client for a video info/download service
//!
//! This library holds the client-side orchestration for a service that
//! extracts video metadata and transcodes downloads.
//!
//! # Features
//!
//! - Fetch title, thumbnail and duration for a video URL
//! - Download the transcoded file and save it locally
//! - Single-flight session state machine with a busy guard
//! - Pluggable service and save backends
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use vidgrab::{spawn_session, Config, FileSaver, ServiceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("vidgrab.toml"))?;
//!     let client = ServiceClient::new(&config.service)?;
//!     let saver = FileSaver::new(config.output_directory());
//!     let session = spawn_session(Arc::new(client), Arc::new(saver), "mp4");
//!
//!     session.edit_url("https://youtube.com/watch?v=abc").await?;
//!     session.request_info().await?;
//!     let state = session.settled().await?;
//!     if state.info.is_some() {
//!         session.request_download().await?;
//!         session.settled().await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod save;
pub mod session;

// Re-exports for convenience
pub use api::{MediaService, ServiceClient, VideoInfo};
pub use config::Config;
pub use error::{Error, Failure, Result};
pub use save::{FileSaver, SaveTrigger};
pub use session::{spawn_session, Phase, SessionHandle, SessionState};
