//! Configuration validation logic.

use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_base_url(&config.service.base_url)?;
    validate_timeout(config.service.timeout_secs)?;
    validate_extension(&config.output.extension)?;

    Ok(())
}

/// Validate the service base URL.
pub fn validate_base_url(base_url: &str) -> Result<Url> {
    if base_url.trim().is_empty() {
        return Err(Error::ConfigValidation {
            field: "base_url".to_string(),
            message: "Service URL cannot be empty".to_string(),
        });
    }

    let url = Url::parse(base_url)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "base_url".to_string(),
            message: format!("Unsupported scheme '{}' (expected http or https)", url.scheme()),
        });
    }

    if url.cannot_be_a_base() {
        return Err(Error::ConfigValidation {
            field: "base_url".to_string(),
            message: format!("'{}' cannot be used as a base URL", base_url),
        });
    }

    Ok(url)
}

/// Validate the optional transport timeout.
pub fn validate_timeout(timeout_secs: Option<u64>) -> Result<()> {
    if timeout_secs == Some(0) {
        return Err(Error::ConfigValidation {
            field: "timeout_secs".to_string(),
            message: "Timeout must be greater than zero (omit it to disable)".to_string(),
        });
    }

    Ok(())
}

/// Validate the saved file extension.
pub fn validate_extension(extension: &str) -> Result<()> {
    if extension.is_empty() {
        return Err(Error::ConfigValidation {
            field: "extension".to_string(),
            message: "Extension cannot be empty".to_string(),
        });
    }

    if extension.contains(['.', '/', '\\']) {
        return Err(Error::ConfigValidation {
            field: "extension".to_string(),
            message: format!(
                "Extension '{}' must not contain dots or path separators",
                extension
            ),
        });
    }

    Ok(())
}
