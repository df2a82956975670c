//! Control channel address derived from the window's content URL.

use tokio_tungstenite::tungstenite::http::Uri;
use winrelay_common::BridgeError;

/// Build `ws(s)://host:port/<path>` for the host serving `content_url`.
///
/// `http`/`ws` map to `ws`, `https`/`wss` map to `wss`. A missing port falls
/// back to the scheme default.
pub fn bridge_endpoint(content_url: &str, path: &str) -> Result<String, BridgeError> {
    let uri: Uri = content_url
        .parse()
        .map_err(|e| BridgeError::InvalidEndpoint(format!("{content_url}: {e}")))?;

    let (scheme, default_port) = match uri.scheme_str() {
        Some("http") | Some("ws") => ("ws", 80),
        Some("https") | Some("wss") => ("wss", 443),
        other => {
            return Err(BridgeError::InvalidEndpoint(format!(
                "{content_url}: unsupported scheme {}",
                other.unwrap_or("(none)")
            )))
        }
    };

    let host = uri
        .host()
        .ok_or_else(|| BridgeError::InvalidEndpoint(format!("{content_url}: missing host")))?;
    let port = uri.port_u16().unwrap_or(default_port);

    Ok(format!(
        "{scheme}://{host}:{port}/{}",
        path.trim_start_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_url_maps_to_ws() {
        assert_eq!(
            bridge_endpoint("http://localhost:9000/index.html", "bridge").unwrap(),
            "ws://localhost:9000/bridge"
        );
    }

    #[test]
    fn https_without_port_uses_default() {
        assert_eq!(
            bridge_endpoint("https://example.com/app/", "/bridge").unwrap(),
            "wss://example.com:443/bridge"
        );
    }

    #[test]
    fn rewritten_address_is_kept() {
        assert_eq!(
            bridge_endpoint("http://10.0.0.5:43102/main.html", "bridge").unwrap(),
            "ws://10.0.0.5:43102/bridge"
        );
    }

    #[test]
    fn file_url_is_rejected() {
        let err = bridge_endpoint("file:///tmp/index.html", "bridge").unwrap_err();
        assert!(matches!(err, BridgeError::InvalidEndpoint(_)));
    }

    #[test]
    fn relative_url_is_rejected() {
        assert!(bridge_endpoint("index.html", "bridge").is_err());
    }
}
