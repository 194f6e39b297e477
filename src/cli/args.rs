//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// vidgrab client CLI.
#[derive(Parser, Debug)]
#[command(
    name = "vidgrab",
    version,
    about = "Fetch video info and download transcoded files from a vidgrab service",
    long_about = "Submit a video URL to a vidgrab service, review its title and duration, \
                  and save the transcoded file locally.\n\n\
                  Without --url an interactive prompt is started."
)]
pub struct Args {
    /// Video URL to process in one-shot mode.
    #[arg(short, long)]
    pub url: Option<String>,

    /// Download without asking for confirmation (one-shot mode).
    #[arg(short, long)]
    pub yes: bool,

    /// Only fetch and print video info (one-shot mode).
    #[arg(long, conflicts_with = "yes")]
    pub info_only: bool,

    /// Base URL of the vidgrab service.
    #[arg(short, long, env = "VIDGRAB_SERVER")]
    pub server: Option<String>,

    /// Transport timeout in seconds (no timeout by default).
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Directory downloaded files are saved into.
    #[arg(short = 'd', long = "directory", env = "VIDGRAB_DIRECTORY")]
    pub output_directory: Option<PathBuf>,

    /// Extension appended to the video title when saving.
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "vidgrab.toml")]
    pub config: PathBuf,

    /// Check that the service is reachable and exit.
    #[arg(long)]
    pub check: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(server) = &self.server {
            config.service.base_url = server.clone();
        }

        if let Some(timeout) = self.timeout {
            config.service.timeout_secs = Some(timeout);
        }

        if let Some(dir) = &self.output_directory {
            config.output.directory = Some(dir.clone());
        }

        if let Some(extension) = &self.extension {
            config.output.extension = extension.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_merge_overrides_only_given_values() {
        let args = Args::parse_from([
            "vidgrab",
            "--server",
            "https://grab.example.com",
            "--extension",
            "mkv",
        ]);

        let mut config = Config::default();
        config.service.timeout_secs = Some(120);
        args.merge_into_config(&mut config);

        assert_eq!(config.service.base_url, "https://grab.example.com");
        assert_eq!(config.output.extension, "mkv");
        assert_eq!(config.service.timeout_secs, Some(120));
        assert!(config.output.directory.is_none());
    }

    #[test]
    fn test_one_shot_flags() {
        let args = Args::parse_from(["vidgrab", "-u", "https://youtube.com/watch?v=abc", "-y"]);
        assert_eq!(args.url.as_deref(), Some("https://youtube.com/watch?v=abc"));
        assert!(args.yes);
        assert!(!args.info_only);
    }
}
