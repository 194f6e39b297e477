//! Save trigger module.
//!
//! Provides:
//! - The `SaveTrigger` capability that turns downloaded bytes into a user-visible file
//! - A file-system implementation
//! - Filename sanitization

pub mod file;
pub mod naming;
pub mod trigger;

pub use file::FileSaver;
pub use naming::{numbered_filename, sanitize_filename, suggested_filename};
pub use trigger::SaveTrigger;
