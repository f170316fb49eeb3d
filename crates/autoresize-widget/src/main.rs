//! autoresize-ctl: command-line access to the resize endpoint.
//!
//! The widget talks to the resize service from inside the viewer page.  This
//! binary issues the same calls from a terminal, which is handy when
//! checking a deployment or scripting a resolution change.
//!
//! # Usage
//!
//! ```text
//! autoresize-ctl [OPTIONS] <COMMAND>
//!
//! Commands:
//!   health       Probe the endpoint and print its answer
//!   resize       Request a new remote resolution
//!   resolution   Print the current remote resolution
//!
//! Options:
//!   --config  <FILE>    TOML file with a [endpoint] table and timings
//!   --host    <HOST>    Endpoint host [default: localhost]
//!   --port    <PORT>    Endpoint port [default: 6081]
//!   --scheme  <SCHEME>  http or https [default: http]
//!   --timeout-ms <MS>   Per-request timeout [default: 5000]
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable             | Description                   |
//! |----------------------|-------------------------------|
//! | `AUTORESIZE_CONFIG`  | Path of the TOML config file  |
//! | `AUTORESIZE_HOST`    | Endpoint host                 |
//! | `AUTORESIZE_PORT`    | Endpoint port                 |
//!
//! Command-line flags win over environment variables, which win over the
//! config file, which wins over the built-in defaults.

use std::path::PathBuf;

use anyhow::{bail, Context};
use autoresize_core::{quantize, Size, StatusMessage, WidgetConfig};
use autoresize_widget::infrastructure::http::HttpResizeClient;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Command-line client for the remote-session resize endpoint.
#[derive(Debug, Parser)]
#[command(
    name = "autoresize-ctl",
    about = "Query and drive the remote-session resize endpoint",
    version
)]
struct Cli {
    /// TOML configuration file.  Missing keys fall back to defaults.
    #[arg(long, env = "AUTORESIZE_CONFIG")]
    config: Option<PathBuf>,

    /// Host running the resize endpoint.
    #[arg(long, env = "AUTORESIZE_HOST")]
    host: Option<String>,

    /// Port of the resize endpoint.
    #[arg(long, env = "AUTORESIZE_PORT")]
    port: Option<u16>,

    /// URL scheme (`http` or `https`).
    #[arg(long)]
    scheme: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Probe `/health` and print the JSON answer.
    Health,

    /// Request a new remote resolution.
    Resize {
        #[arg(long)]
        width: u32,

        #[arg(long)]
        height: u32,

        /// Send the size as given instead of flooring it to the 8-pixel grid.
        #[arg(long)]
        exact: bool,
    },

    /// Print the remote session's current resolution.
    Resolution,
}

impl Cli {
    /// Builds the effective configuration: file, then flag/env overrides.
    fn into_config(self) -> anyhow::Result<(WidgetConfig, Command)> {
        let mut config = match &self.config {
            Some(path) => WidgetConfig::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => WidgetConfig::default(),
        };

        if let Some(host) = self.host {
            config.endpoint.host = host;
        }
        if let Some(port) = self.port {
            config.endpoint.port = port;
        }
        if let Some(scheme) = self.scheme {
            if scheme != "http" && scheme != "https" {
                bail!("unsupported scheme '{scheme}': expected http or https");
            }
            config.endpoint.scheme = scheme;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.request_timeout_ms = timeout_ms;
        }

        Ok((config, self.command))
    }
}

/// Size actually sent for a `resize` command.
fn target_size(width: u32, height: u32, exact: bool) -> Size {
    if exact {
        Size::new(width, height)
    } else {
        quantize(width, height)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (config, command) = Cli::parse().into_config()?;
    let client = HttpResizeClient::from_config(&config);
    debug!(endpoint = %config.endpoint.base_url(), "using resize endpoint");

    match command {
        Command::Health => {
            let body = client
                .health()
                .await
                .context("resize endpoint is not available")?;
            println!("{body}");
        }
        Command::Resize {
            width,
            height,
            exact,
        } => {
            let size = target_size(width, height, exact);
            info!(%size, "requesting resize");
            let response = client
                .resize(size)
                .await
                .with_context(|| format!("resize to {size} could not be sent"))?;
            if !response.success {
                let reason = response.error.as_deref().unwrap_or("not successful");
                bail!("resize to {size} failed: {reason}");
            }
            let applied = response.applied_size().unwrap_or(size);
            println!("{}", StatusMessage::Resized(applied));
        }
        Command::Resolution => {
            let size = client
                .current_resolution()
                .await
                .context("could not read the current resolution")?;
            println!("{size}");
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
