//! Configuration module for the vidgrab client.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{Config, OutputConfig, ServiceConfig};
pub use validation::validate_config;
