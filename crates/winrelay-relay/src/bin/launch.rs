//! winrelay-launch: ask a relay daemon to open a window and wait for it.
//!
//! Exits with the window process's exit code, or 125 when the relay could
//! not run the window at all.

use std::path::PathBuf;

use clap::Parser;
use winrelay_common::LaunchFlags;
use winrelay_config::init_logging;
use winrelay_relay::{LaunchRequest, RelayClient};

#[derive(Parser)]
#[command(name = "winrelay-launch", version, about = "Open a native window through a relay daemon")]
struct Args {
    /// Content URL the window should load.
    url: String,

    /// Relay daemon host (defaults to `launch.host`).
    #[arg(long)]
    host: Option<String>,

    /// Relay daemon port (defaults to `launch.port`).
    #[arg(short, long)]
    port: Option<u16>,

    /// Address the display host uses to reach this machine; replaces
    /// `localhost` in the URL (defaults to `launch.display_address`).
    #[arg(long)]
    display_address: Option<String>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    title: Option<String>,

    /// Window flag bits (see `[window] flags` in the config).
    #[arg(long)]
    flags: Option<u32>,

    /// Config file path override.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Extra arguments passed through to the window process.
    #[arg(last = true)]
    extra: Vec<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = winrelay_config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("winrelay-launch: config load failed, using defaults: {e}");
        winrelay_config::WinrelayConfig::default()
    });

    init_logging(&winrelay_relay::LOG_CRATES, args.log_level.as_deref(), &config.logging);

    let mut launch = config.launch;
    if let Some(host) = args.host {
        launch.host = host;
    }
    if let Some(port) = args.port {
        launch.port = port;
    }
    if let Some(address) = args.display_address {
        launch.display_address = address;
    }

    let window = config.window;
    let request = LaunchRequest::new(args.url)
        .with_size(
            args.width.unwrap_or(window.width),
            args.height.unwrap_or(window.height),
        )
        .with_title(args.title.unwrap_or(window.title))
        .with_flags(args.flags.map(LaunchFlags::from_bits).unwrap_or(window.flags))
        .with_extra(args.extra);

    let client = RelayClient::from_config(&launch);
    let status = client.launch(&request).await;

    if status.is_relay_failure() {
        tracing::error!(host = %launch.host, port = launch.port, "{status}");
    } else {
        tracing::info!("Window {status}");
    }
    std::process::exit(status.process_exit_code());
}
