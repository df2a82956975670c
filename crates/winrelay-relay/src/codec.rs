//! Length-prefixed wire encoding shared by the relay client and server.
//!
//! Command frame: `u64 count`, then `count` strings, each a `u64 length`
//! followed by that many UTF-8 bytes. Status frame: a single `i64`.
//! All integers are big-endian.

use tokio::io::{AsyncRead, AsyncReadExt};
use winrelay_common::FrameError;

/// Maximum number of arguments accepted in one command frame.
pub const MAX_ARGS: u64 = 4096;

/// Maximum byte length of a single argument.
pub const MAX_ARG_LEN: u64 = 16 * 1024 * 1024;

/// Encode an argument vector as a command frame.
pub fn encode_command<S: AsRef<str>>(args: &[S]) -> Vec<u8> {
    let payload: usize = args.iter().map(|a| 8 + a.as_ref().len()).sum();
    let mut buf = Vec::with_capacity(8 + payload);
    buf.extend_from_slice(&(args.len() as u64).to_be_bytes());
    for arg in args {
        let bytes = arg.as_ref().as_bytes();
        buf.extend_from_slice(&(bytes.len() as u64).to_be_bytes());
        buf.extend_from_slice(bytes);
    }
    buf
}

/// Decode one command frame from `reader`.
pub async fn decode_command<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<String>, FrameError> {
    let count = read_u64(reader).await?;
    if count > MAX_ARGS {
        return Err(FrameError::TooLarge {
            what: "argument count",
            len: count,
            max: MAX_ARGS,
        });
    }

    let mut args = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let len = read_u64(reader).await?;
        if len > MAX_ARG_LEN {
            return Err(FrameError::TooLarge {
                what: "argument length",
                len,
                max: MAX_ARG_LEN,
            });
        }
        let mut bytes = vec![0u8; len as usize];
        read_full(reader, &mut bytes).await?;
        let arg = String::from_utf8(bytes).map_err(|_| FrameError::InvalidUtf8)?;
        args.push(arg);
    }
    Ok(args)
}

/// Encode an exit status as a status frame.
pub fn encode_status(status: i64) -> [u8; 8] {
    status.to_be_bytes()
}

/// Decode one status frame from `reader`.
pub async fn decode_status<R: AsyncRead + Unpin>(reader: &mut R) -> Result<i64, FrameError> {
    let mut buf = [0u8; 8];
    read_full(reader, &mut buf).await?;
    Ok(i64::from_be_bytes(buf))
}

async fn read_u64<R: AsyncRead + Unpin>(reader: &mut R) -> Result<u64, FrameError> {
    let mut buf = [0u8; 8];
    read_full(reader, &mut buf).await?;
    Ok(u64::from_be_bytes(buf))
}

/// Fill `buf` completely. A zero-length read before the buffer is full
/// means the peer went away mid-frame.
async fn read_full<R: AsyncRead + Unpin>(reader: &mut R, buf: &mut [u8]) -> Result<(), FrameError> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            return Err(FrameError::Truncated {
                expected: buf.len() as u64,
                received: filled as u64,
            });
        }
        filled += n;
    }
    Ok(())
}
