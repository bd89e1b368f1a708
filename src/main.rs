//! Guidepost - tutorial lookup and on-screen element location.
//!
//! Main entry point for the Guidepost CLI and server.

mod cli;
mod cmd_locate;
mod register;
mod server;

use clap::Parser;
use tracing::{error, info, warn};

use guidepost_config::{ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    server::init_tracing()?;

    let mut config = ConfigLoader::load_or_default(&cli.config)?;

    match cli.command.unwrap_or(Commands::Run { host: None, port: None }) {
        Commands::Run { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::run_server(config).await?;
        }
        Commands::Locate {
            image,
            ocr,
            steps,
            width,
            height,
        } => {
            let request = cmd_locate::LocateRequest {
                image,
                ocr,
                steps,
                width,
                height,
            };
            let output = cmd_locate::run(&config, &request).await?;
            println!("{}", output);
        }
        Commands::CheckConfig => {
            let result = ConfigValidator::validate(&config);
            for warning in &result.warnings {
                warn!("{}: {}", warning.path, warning.message);
            }
            if result.is_valid() {
                info!("Configuration {} is valid", cli.config.display());
            } else {
                for err in &result.errors {
                    error!("{}: {}", err.path, err.message);
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
