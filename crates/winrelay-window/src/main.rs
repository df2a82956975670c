mod app_state;
mod cli;
mod dialogs;
mod scripts;

use winit::event_loop::EventLoop;

const LOG_CRATES: [&str; 4] = ["winrelay_window", "winrelay_bridge", "winrelay_config", "winrelay_common"];

fn main() {
    let args = cli::parse();

    let config = winrelay_config::load_config(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("winrelay-window: config load failed, using defaults: {e}");
        winrelay_config::WinrelayConfig::default()
    });

    winrelay_config::init_logging(&LOG_CRATES, args.log_level.as_deref(), &config.logging);

    let options = match args.resolve(&config) {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };

    tracing::info!("winrelay-window v{} starting...", env!("CARGO_PKG_VERSION"));

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };

    let mut app = app_state::WindowApp::new(options);
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    std::process::exit(app.exit_code());
}
