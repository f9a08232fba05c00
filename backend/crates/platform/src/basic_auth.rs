//! HTTP Basic authentication header parsing (RFC 7617)

use axum::http::{HeaderMap, header};

use crate::crypto::from_base64;

/// Credentials carried by an `Authorization: Basic ...` header
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Parse the Basic credentials from request headers
///
/// Returns `None` for a missing header, another scheme, bad base64, non-UTF-8
/// payload, or a payload without `:`. Callers treat all of these the same as
/// wrong credentials.
pub fn parse_basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = String::from_utf8(from_base64(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}
