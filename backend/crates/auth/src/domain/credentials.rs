//! Admin Credentials

use platform::crypto::constant_time_eq;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The single configured admin username/password pair
///
/// Memory is zeroized when dropped. Stored literally: there is one admin and
/// the pair comes from the environment, so there is nothing to hash against.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check a presented pair against the configured one
    ///
    /// Both comparisons always run, so timing does not reveal which field was wrong.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let username_ok = constant_time_eq(username.as_bytes(), self.username.as_bytes());
        let password_ok = constant_time_eq(password.as_bytes(), self.password.as_bytes());
        username_ok & password_ok
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
