pub mod errors;
pub mod flags;

pub use errors::{BridgeError, ConfigError, FrameError, WinrelayError};
pub use flags::LaunchFlags;

pub type Result<T> = std::result::Result<T, WinrelayError>;
