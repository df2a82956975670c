//! Launch relay daemon: one window launch in flight at a time.
//!
//! Each accepted connection is serviced to completion (read frame, run the
//! child, write its status) before the next `accept`. A second caller waits
//! in the listen backlog until the current window process exits.

use std::net::SocketAddr;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tokio::process::Command;
use winrelay_common::FrameError;

use crate::codec::{decode_command, encode_status};
use crate::status::LaunchStatus;

/// How long a caller may take to deliver its command frame.
pub const FRAME_READ_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RelayServer {
    listener: TcpListener,
    spawn_prefix: Vec<String>,
}

impl RelayServer {
    /// Bind the daemon socket.
    pub async fn bind<A: ToSocketAddrs>(addr: A, spawn_prefix: Vec<String>) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self::from_listener(listener, spawn_prefix))
    }

    pub fn from_listener(listener: TcpListener, spawn_prefix: Vec<String>) -> Self {
        Self {
            listener,
            spawn_prefix,
        }
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop. Never returns; the daemon ends with its process.
    pub async fn run(self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => match self.handle_connection(stream, peer).await {
                    Ok(status) => {
                        tracing::info!(peer = %peer, status = status.code(), "Launch finished");
                    }
                    Err(e) => {
                        tracing::warn!(peer = %peer, error = %e, "Launch request aborted");
                    }
                },
                Err(e) => {
                    tracing::warn!(error = %e, "TCP accept error");
                }
            }
        }
    }

    /// Service one launch request end to end.
    async fn handle_connection(
        &self,
        mut stream: TcpStream,
        peer: SocketAddr,
    ) -> Result<LaunchStatus, FrameError> {
        let args = match tokio::time::timeout(FRAME_READ_TIMEOUT, decode_command(&mut stream)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(FrameError::Io(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "command frame not received in time",
                )))
            }
        };
        if args.is_empty() {
            return Err(FrameError::EmptyCommand);
        }

        let argv: Vec<String> = self.spawn_prefix.iter().cloned().chain(args).collect();
        tracing::info!(peer = %peer, argv = ?argv, "Spawning window process");

        let status = spawn_and_wait(&argv).await;

        stream.write_all(&encode_status(status.code())).await?;
        stream.shutdown().await?;
        Ok(status)
    }
}

/// Run `argv` to completion with stdin closed and output inherited.
async fn spawn_and_wait(argv: &[String]) -> LaunchStatus {
    let Some((program, args)) = argv.split_first() else {
        return LaunchStatus::SpawnFailed;
    };

    let result = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await;

    match result {
        Ok(status) => LaunchStatus::from_exit_status(status),
        Err(e) => {
            tracing::error!(program = %program, error = %e, "Failed to spawn window process");
            LaunchStatus::SpawnFailed
        }
    }
}

/// Bind `addr` and serve launch requests forever.
pub async fn serve<A: ToSocketAddrs>(addr: A, spawn_prefix: Vec<String>) -> std::io::Result<()> {
    let server = RelayServer::bind(addr, spawn_prefix).await?;
    tracing::info!("winrelay-relay listening on {}", server.local_addr()?);
    server.run().await;
    Ok(())
}
