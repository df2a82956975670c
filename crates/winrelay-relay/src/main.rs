//! winrelay-relay: launch daemon for the display host.
//!
//! Listens on one TCP port and spawns `PREFIX... ARGS...` for every launch
//! request, one at a time, answering each caller with the exit status.

use std::path::PathBuf;

use clap::Parser;
use winrelay_config::init_logging;
use winrelay_relay::serve;

#[derive(Parser)]
#[command(name = "winrelay-relay", version, about = "Spawn native windows for remote content hosts")]
struct Args {
    /// Port to listen on (defaults to `relay.port` from the config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Interface to bind (defaults to `relay.bind_address`).
    #[arg(long)]
    bind: Option<String>,

    /// Config file path override.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Program and leading arguments to run for each request
    /// (defaults to `relay.spawn_prefix`).
    #[arg(last = true)]
    spawn_prefix: Vec<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = winrelay_config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("winrelay-relay: config load failed, using defaults: {e}");
        winrelay_config::WinrelayConfig::default()
    });

    init_logging(&winrelay_relay::LOG_CRATES, args.log_level.as_deref(), &config.logging);

    let bind = args.bind.unwrap_or(config.relay.bind_address);
    let port = args.port.unwrap_or(config.relay.port);
    let spawn_prefix = if args.spawn_prefix.is_empty() {
        config.relay.spawn_prefix
    } else {
        args.spawn_prefix
    };

    tracing::info!(prefix = ?spawn_prefix, "Window launch command configured");

    if let Err(e) = serve((bind.as_str(), port), spawn_prefix).await {
        tracing::error!(bind = %bind, port, error = %e, "Failed to bind relay listener");
        std::process::exit(1);
    }
}
