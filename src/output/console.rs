//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     vidgrab                                           ║
║     Fetch video info and download MP4s                ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(service_url: &str, output_dir: &str, extension: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Service:   {}", service_url);
    println!("  Directory: {}", output_dir);
    println!("  Extension: {}", extension);
    println!();
}

/// Print the interactive command list.
pub fn print_help() {
    println!("{}", style("Commands:").bold());
    println!("  url <URL>   set the video URL");
    println!("  info        fetch video info for the current URL");
    println!("  download    download the video info was fetched for");
    println!("  status      show the current state");
    println!("  help        show this list");
    println!("  quit        exit");
}
