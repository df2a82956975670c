//! Loopback host rewriting for window URLs.
//!
//! The content host builds URLs against `localhost`. A window spawned on a
//! different display host must reach the content host instead, so the
//! loopback name is swapped for the address the display host can route to.

/// Loopback hostname replaced in window URLs.
pub const LOOPBACK_HOST: &str = "localhost";

/// Replace the first `localhost` in `url` with `display_address`.
///
/// A no-op when `localhost` does not appear or `display_address` is empty.
pub fn rewrite_loopback(url: &str, display_address: &str) -> String {
    if display_address.is_empty() {
        return url.to_string();
    }
    url.replacen(LOOPBACK_HOST, display_address, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_loopback_host() {
        assert_eq!(
            rewrite_loopback("ws://localhost:9000/x", "10.0.0.5"),
            "ws://10.0.0.5:9000/x"
        );
    }

    #[test]
    fn no_op_without_localhost() {
        assert_eq!(
            rewrite_loopback("http://127.0.0.1:9000/index.html", "10.0.0.5"),
            "http://127.0.0.1:9000/index.html"
        );
    }

    #[test]
    fn no_op_with_empty_display_address() {
        assert_eq!(
            rewrite_loopback("http://localhost:9000/", ""),
            "http://localhost:9000/"
        );
    }

    #[test]
    fn only_the_host_occurrence_changes() {
        assert_eq!(
            rewrite_loopback("http://localhost:8080/localhost.html", "display.lan"),
            "http://display.lan:8080/localhost.html"
        );
    }
}
