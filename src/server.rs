//! Server initialization and startup logic for Guidepost.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use guidepost_api::{InterfaceConfig, InterfaceServer};
use guidepost_config::{Config, ConfigValidator};

use crate::register::build_state;

/// Get the .guidepost directory path.
pub(crate) fn guidepost_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".guidepost"))
        .unwrap_or_else(|| PathBuf::from(".guidepost"))
}

/// Initialize tracing with console and file output.
///
/// Console output goes to stderr so `locate` can print JSON on stdout. Log
/// files are written to ~/.guidepost/logs/ with daily rotation.
pub(crate) fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = guidepost_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("guidepost")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the background writer alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Run the HTTP server in foreground.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Guidepost v{}", env!("CARGO_PKG_VERSION"));

    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in warnings {
        tracing::warn!("Config {}: {}", warning.path, warning.message);
    }

    let state = Arc::new(build_state(&config)?);

    let interface_config = InterfaceConfig::new(config.server.host.clone(), config.server.port)
        .with_cors_origins(config.server.cors_origins.clone())
        .with_max_upload_bytes(config.server.max_upload_bytes);
    let server = InterfaceServer::new(interface_config, state);

    info!("Listening on http://{}", server.addr());
    server.run().await
}
