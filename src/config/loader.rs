//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Metadata/download service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service (the `/info` and `/download` endpoints live under it).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Transport timeout in seconds. No client-side timeout when absent.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Where and how downloaded files are saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory files are saved into.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Extension appended to the video title, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            extension: default_extension(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:10000".to_string()
}

fn default_user_agent() -> String {
    format!("vidgrab/{}", env!("CARGO_PKG_VERSION"))
}

fn default_extension() -> String {
    "mp4".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective output directory.
    ///
    /// Falls back to the user's Downloads folder, then the current directory.
    pub fn output_directory(&self) -> PathBuf {
        if let Some(dir) = &self.output.directory {
            return dir.clone();
        }

        directories::UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}
