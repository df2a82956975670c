//! Launch outcome as seen by the relay caller.
//!
//! Child processes report exit codes that always fit in an `i32` (signals
//! are folded in as negative numbers). The relay's own failure codes sit
//! below `i32::MIN`, so the two ranges can never collide on the wire.

use std::fmt;

/// Client could not connect to the relay daemon; nothing was sent.
pub const STATUS_CONNECTION_REFUSED: i64 = i32::MIN as i64 - 1;

/// The frame was sent but no status came back.
pub const STATUS_TRANSPORT_FAILURE: i64 = i32::MIN as i64 - 2;

/// The daemon decoded the frame but could not start the process.
pub const STATUS_SPAWN_FAILED: i64 = i32::MIN as i64 - 3;

/// Exit code the CLI uses when the relay itself failed.
pub const RELAY_FAILURE_EXIT_CODE: i32 = 125;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStatus {
    /// The window process ran and exited with this code.
    Exited(i64),
    ConnectionRefused,
    TransportFailure,
    SpawnFailed,
}

impl LaunchStatus {
    /// Wire representation.
    pub fn code(self) -> i64 {
        match self {
            Self::Exited(code) => code,
            Self::ConnectionRefused => STATUS_CONNECTION_REFUSED,
            Self::TransportFailure => STATUS_TRANSPORT_FAILURE,
            Self::SpawnFailed => STATUS_SPAWN_FAILED,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            STATUS_CONNECTION_REFUSED => Self::ConnectionRefused,
            STATUS_TRANSPORT_FAILURE => Self::TransportFailure,
            STATUS_SPAWN_FAILED => Self::SpawnFailed,
            code => Self::Exited(code),
        }
    }

    /// Map a finished child process. A signal-terminated child is reported
    /// as the negated signal number.
    pub fn from_exit_status(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::Exited(code.into());
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::Exited(-i64::from(signal));
            }
        }

        Self::Exited(-1)
    }

    /// True when the relay, not the child, produced this status.
    pub fn is_relay_failure(self) -> bool {
        !matches!(self, Self::Exited(_))
    }

    /// Exit code for a CLI wrapping the launch.
    pub fn process_exit_code(self) -> i32 {
        match self {
            Self::Exited(code) => i32::try_from(code).unwrap_or(RELAY_FAILURE_EXIT_CODE),
            _ => RELAY_FAILURE_EXIT_CODE,
        }
    }
}

impl fmt::Display for LaunchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exited with code {code}"),
            Self::ConnectionRefused => write!(f, "relay connection refused"),
            Self::TransportFailure => write!(f, "relay transport failure"),
            Self::SpawnFailed => write!(f, "relay could not spawn the window process"),
        }
    }
}
