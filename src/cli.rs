//! CLI definitions for Guidepost.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Guidepost CLI.
#[derive(Parser)]
#[command(name = "guidepost")]
#[command(about = "Tutorial lookup and on-screen element location service")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the HTTP server in foreground (default)
    Run {
        /// Server host, overrides `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Server port, overrides `server.port`
        #[arg(long)]
        port: Option<u16>,
    },

    /// Resolve step locations against a saved OCR document
    Locate {
        /// Screenshot the OCR document was produced from
        #[arg(long)]
        image: PathBuf,

        /// OCR document as JSON
        #[arg(long)]
        ocr: PathBuf,

        /// Step data as JSON (one step or a list)
        #[arg(long)]
        steps: PathBuf,

        /// Viewport width in pixels
        #[arg(long)]
        width: u32,

        /// Viewport height in pixels
        #[arg(long)]
        height: u32,
    },

    /// Validate the configuration file
    CheckConfig,
}
