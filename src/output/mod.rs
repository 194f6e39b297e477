//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Busy spinner
//! - Session state rendering

pub mod console;
pub mod progress;
pub mod view;

pub use self::console::{
    print_banner, print_config_summary, print_error, print_help, print_info, print_success,
    print_warning,
};
pub use progress::{busy_message, create_spinner};
pub use view::{print_outcome, print_state, print_video_info};
