use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Errors raised while reading or writing a launch relay frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The peer stopped sending before the declared byte count arrived.
    #[error("frame truncated: expected {expected} bytes, received {received}")]
    Truncated { expected: u64, received: u64 },

    #[error("frame string is not valid UTF-8")]
    InvalidUtf8,

    #[error("frame {what} of {len} exceeds limit {max}")]
    TooLarge {
        what: &'static str,
        len: u64,
        max: u64,
    },

    #[error("command frame is empty")]
    EmptyCommand,
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("invalid bridge endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("bridge connect failed: {0}")]
    Connect(String),

    #[error("bridge transport error: {0}")]
    Transport(String),

    #[error("malformed control message: {0}")]
    MalformedMessage(String),

    #[error("native window error: {0}")]
    Window(String),
}

#[derive(Debug, thiserror::Error)]
pub enum WinrelayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
