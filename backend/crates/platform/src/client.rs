//! Client identification utilities
//!
//! Resolves the caller's address from proxy headers and reduces it to an
//! opaque hash used for rate limiting and like de-duplication.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use crate::crypto::sha256_hex_prefix;

/// Length of the identity key in hex characters (64 bits)
pub const CLIENT_KEY_HEX_LEN: usize = 16;

/// Address used when nothing identifies the caller
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Hashed client identity
///
/// The raw address never leaves this type's constructor; only the truncated
/// SHA-256 hex digest is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity {
    key: String,
}

impl ClientIdentity {
    /// Hash an already-resolved address string
    pub fn from_address(address: &str) -> Self {
        Self {
            key: sha256_hex_prefix(address.as_bytes(), CLIENT_KEY_HEX_LEN),
        }
    }

    /// Resolve from request headers and the socket peer, then hash
    pub fn resolve(headers: &HeaderMap, peer_ip: Option<IpAddr>) -> Self {
        Self::from_address(&resolve_client_address(headers, peer_ip))
    }

    /// The hex key used by downstream stores
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Resolve the client address string
///
/// Order: first `X-Forwarded-For` entry, then `X-Real-IP`, then the socket
/// peer, then [`UNKNOWN_CLIENT`]. Header values are taken verbatim (trimmed);
/// they are hashed, not parsed.
///
/// A non-empty `X-Forwarded-For` always decides, even when its first entry
/// trims to an empty string.
pub fn resolve_client_address(headers: &HeaderMap, peer_ip: Option<IpAddr>) -> String {
    if let Some(xff) = header_str(headers, "x-forwarded-for").filter(|s| !s.is_empty()) {
        let first = xff.split(',').next().unwrap_or_default();
        return first.trim().to_string();
    }

    if let Some(real_ip) = header_str(headers, "x-real-ip")
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return real_ip.to_string();
    }

    peer_ip
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Extractor: works with or without `into_make_service_with_connect_info`.
impl<S> FromRequestParts<S> for ClientIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());
        Ok(ClientIdentity::resolve(&parts.headers, peer_ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_forwarded_for_first_entry_wins() {
        let h = headers(&[
            ("x-forwarded-for", " 192.168.1.1 , 10.0.0.1"),
            ("x-real-ip", "172.16.0.1"),
        ]);
        let peer: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(resolve_client_address(&h, Some(peer)), "192.168.1.1");
    }

    #[test]
    fn test_real_ip_fallback() {
        let h = headers(&[("x-real-ip", "172.16.0.1")]);
        assert_eq!(resolve_client_address(&h, None), "172.16.0.1");
    }

    #[test]
    fn test_forwarded_for_blank_first_entry_still_decides() {
        let h = headers(&[("x-forwarded-for", " , 10.0.0.1"), ("x-real-ip", "172.16.0.1")]);
        let peer: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(resolve_client_address(&h, Some(peer)), "");
        assert_eq!(
            ClientIdentity::resolve(&h, Some(peer)),
            ClientIdentity::from_address("")
        );
    }

    #[test]
    fn test_empty_forwarded_for_header_is_skipped() {
        let h = headers(&[("x-forwarded-for", ""), ("x-real-ip", "172.16.0.1")]);
        assert_eq!(resolve_client_address(&h, None), "172.16.0.1");
    }

    #[test]
    fn test_peer_then_unknown() {
        let peer: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(resolve_client_address(&HeaderMap::new(), Some(peer)), "127.0.0.1");
        assert_eq!(resolve_client_address(&HeaderMap::new(), None), UNKNOWN_CLIENT);
    }

    #[test]
    fn test_identity_is_stable_truncated_hash() {
        let a = ClientIdentity::from_address("203.0.113.7");
        let b = ClientIdentity::resolve(&headers(&[("x-forwarded-for", "203.0.113.7")]), None);
        assert_eq!(a, b);
        assert_eq!(a.key().len(), CLIENT_KEY_HEX_LEN);
        assert!(a.key().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, ClientIdentity::from_address("203.0.113.8"));
    }

    #[tokio::test]
    async fn test_extractor_uses_connect_info() {
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts();
        let addr: SocketAddr = "198.51.100.4:5555".parse().unwrap();
        parts.extensions.insert(ConnectInfo(addr));

        let identity = ClientIdentity::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(identity, ClientIdentity::from_address("198.51.100.4"));
    }
}
