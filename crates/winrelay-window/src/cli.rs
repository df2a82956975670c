use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use winrelay_common::{LaunchFlags, WinrelayError};
use winrelay_config::WinrelayConfig;

/// winrelay-window: a native window around a web page, with a control
/// channel back to the page's host.
#[derive(Parser, Debug)]
#[command(name = "winrelay-window", version, about)]
pub struct Args {
    /// Page to load.
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Initial width in logical pixels.
    #[arg(value_name = "WIDTH")]
    pub width: Option<u32>,

    /// Initial height in logical pixels.
    #[arg(value_name = "HEIGHT")]
    pub height: Option<u32>,

    /// Window title.
    #[arg(value_name = "TITLE")]
    pub title: Option<String>,

    /// Page to load (overrides the positional URL).
    #[arg(long = "url", value_name = "URL")]
    pub url_opt: Option<String>,

    #[arg(long = "width", value_name = "WIDTH")]
    pub width_opt: Option<u32>,

    #[arg(long = "height", value_name = "HEIGHT")]
    pub height_opt: Option<u32>,

    #[arg(long = "title", value_name = "TITLE")]
    pub title_opt: Option<String>,

    /// Launch flag bits (`[window] flags` in the config uses the same values).
    #[arg(long)]
    pub flags: Option<u32>,

    /// Control channel path on the content host.
    #[arg(long)]
    pub bridge_path: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Everything the window host needs, after merging options, positionals and
/// config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub flags: LaunchFlags,
    pub bridge_path: String,
    pub close_timeout: Duration,
}

impl WindowOptions {
    /// Title shown by the window manager; the URL stands in for an empty one.
    pub fn window_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

impl Args {
    /// Options win over positionals, positionals over config.
    pub fn resolve(self, config: &WinrelayConfig) -> Result<WindowOptions, WinrelayError> {
        let url = self
            .url_opt
            .or(self.url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| WinrelayError::Other("no URL given".into()))?;

        Ok(WindowOptions {
            url,
            width: self.width_opt.or(self.width).unwrap_or(config.window.width),
            height: self.height_opt.or(self.height).unwrap_or(config.window.height),
            title: self
                .title_opt
                .or(self.title)
                .unwrap_or_else(|| config.window.title.clone()),
            flags: self.flags.map(LaunchFlags::from_bits).unwrap_or(config.window.flags),
            bridge_path: self.bridge_path.unwrap_or_else(|| config.bridge.path.clone()),
            close_timeout: Duration::from_secs(config.bridge.close_timeout_secs),
        })
    }
}
