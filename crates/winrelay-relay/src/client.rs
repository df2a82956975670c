//! Launch relay client: asks a remote daemon to open a window.

use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use winrelay_common::{FrameError, LaunchFlags};
use winrelay_config::LaunchConfig;

use crate::codec::{decode_status, encode_command};
use crate::rewrite::rewrite_loopback;
use crate::status::LaunchStatus;

/// Connect timeout used by [`request`].
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// A window the caller wants opened on the display host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub flags: LaunchFlags,
    /// Passed through to the window process after the standard arguments.
    pub extra: Vec<String>,
}

impl LaunchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: 1024,
            height: 768,
            title: String::new(),
            flags: LaunchFlags::empty(),
            extra: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_flags(mut self, flags: LaunchFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_extra(mut self, extra: Vec<String>) -> Self {
        self.extra = extra;
        self
    }

    /// Arguments following the URL, in the order the window host parses
    /// them: `WIDTH HEIGHT TITLE [--flags N] [extra...]`.
    ///
    /// A title starting with `-` would be read as an option, so it travels
    /// as `--title=<title>` instead of the positional slot.
    pub fn trailing_args(&self) -> Vec<String> {
        let mut args = vec![self.width.to_string(), self.height.to_string()];
        if self.title.starts_with('-') {
            args.push(format!("--title={}", self.title));
        } else {
            args.push(self.title.clone());
        }
        if !self.flags.is_empty() {
            args.push("--flags".into());
            args.push(self.flags.bits().to_string());
        }
        args.extend(self.extra.iter().cloned());
        args
    }
}

/// Client bound to one relay daemon.
#[derive(Debug, Clone)]
pub struct RelayClient {
    host: String,
    port: u16,
    display_address: String,
    connect_timeout: Duration,
}

impl RelayClient {
    pub fn new(host: impl Into<String>, port: u16, display_address: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            display_address: display_address.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn from_config(config: &LaunchConfig) -> Self {
        Self::new(&config.host, config.port, &config.display_address)
            .with_connect_timeout(Duration::from_secs(config.connect_timeout_secs))
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Launch `req` and wait for the window process to exit.
    pub async fn launch(&self, req: &LaunchRequest) -> LaunchStatus {
        request_with_timeout(
            &self.host,
            self.port,
            &req.url,
            &self.display_address,
            &req.trailing_args(),
            self.connect_timeout,
        )
        .await
    }
}

/// Send one launch request and wait for the child's exit status.
pub async fn request(
    host: &str,
    port: u16,
    window_url: &str,
    display_address: &str,
    extra_args: &[String],
) -> LaunchStatus {
    request_with_timeout(
        host,
        port,
        window_url,
        display_address,
        extra_args,
        DEFAULT_CONNECT_TIMEOUT,
    )
    .await
}

/// [`request`] with an explicit connect timeout.
pub async fn request_with_timeout(
    host: &str,
    port: u16,
    window_url: &str,
    display_address: &str,
    extra_args: &[String],
    connect_timeout: Duration,
) -> LaunchStatus {
    let mut command = Vec::with_capacity(1 + extra_args.len());
    command.push(rewrite_loopback(window_url, display_address));
    command.extend(extra_args.iter().cloned());

    let stream = match tokio::time::timeout(connect_timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            tracing::warn!(host, port, error = %e, "Relay connect failed");
            return LaunchStatus::ConnectionRefused;
        }
        Err(_) => {
            tracing::warn!(host, port, "Relay connect timed out");
            return LaunchStatus::ConnectionRefused;
        }
    };

    tracing::debug!(host, port, argv = ?command, "Sending launch request");

    // The stream is dropped (and the socket closed) on every path below.
    match exchange(stream, &command).await {
        Ok(code) => LaunchStatus::from_code(code),
        Err(e) => {
            tracing::warn!(host, port, error = %e, "Relay exchange failed");
            LaunchStatus::TransportFailure
        }
    }
}

async fn exchange(mut stream: TcpStream, command: &[String]) -> Result<i64, FrameError> {
    stream.write_all(&encode_command(command)).await?;
    stream.flush().await?;
    decode_status(&mut stream).await
}
