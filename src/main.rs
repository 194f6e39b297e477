//! vidgrab - CLI entry point.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use vidgrab::{
    api::ServiceClient,
    cli::{run_interactive, run_one_shot, Args, OneShotOptions},
    config::{validate_config, Config},
    error::{exit_codes, Error, Failure, Result},
    output::{
        print_banner, print_config_summary, print_error, print_info, print_success, print_warning,
    },
    save::FileSaver,
    session::spawn_session,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::TomlParse(_)
                | Error::UrlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Service { .. } | Error::Http(_) | Error::MalformedResponse(_) => {
                    ExitCode::from(exit_codes::API_ERROR as u8)
                }
                Error::Download(_) => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
                Error::SessionClosed => ExitCode::from(exit_codes::ABORT as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            args.config.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);

    validate_config(&config)?;

    let client = ServiceClient::new(&config.service)?;
    let output_dir = config.output_directory();
    print_config_summary(
        client.base_url().as_str(),
        &output_dir.display().to_string(),
        &config.output.extension,
    );

    // Health probe: fatal only with --check
    match client.health().await {
        Ok(health) if health.is_healthy() => {
            if args.check {
                print_success("Service is healthy");
                return Ok(exit_codes::SUCCESS);
            }
        }
        Ok(health) => {
            if args.check {
                print_error(&format!("Service reported status '{}'", health.status));
                return Ok(exit_codes::API_ERROR);
            }
            print_warning(&format!("Service reported status '{}'", health.status));
        }
        Err(e) => {
            if args.check {
                return Err(e);
            }
            print_warning(&format!("Service health check failed: {}", e));
        }
    }

    let session = spawn_session(
        Arc::new(client),
        Arc::new(FileSaver::new(output_dir)),
        config.output.extension.clone(),
    );

    match &args.url {
        Some(url) => {
            let options = OneShotOptions {
                assume_yes: args.yes,
                info_only: args.info_only,
            };
            let code = match run_one_shot(&session, url.trim(), options).await? {
                None => exit_codes::SUCCESS,
                Some(Failure::InfoFetchFailed) => exit_codes::API_ERROR,
                Some(Failure::DownloadFailed) => exit_codes::DOWNLOAD_ERROR,
            };
            Ok(code)
        }
        None => {
            run_interactive(&session).await?;
            print_info("Bye");
            Ok(exit_codes::SUCCESS)
        }
    }
}
