//! Service API module.
//!
//! This module provides:
//! - The `MediaService` seam used by the session
//! - HTTP client for the metadata/download service
//! - Request and response types

pub mod client;
pub mod service;
pub mod types;

pub use client::ServiceClient;
pub use service::MediaService;
pub use types::*;
