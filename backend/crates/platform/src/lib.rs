//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, hex digests, constant-time compare, Base64)
//! - HTTP Basic credential parsing
//! - Client identity resolution (proxy headers → hashed key)
//! - Rate limiting infrastructure (trait + in-memory fixed-window store)

pub mod basic_auth;
pub mod client;
pub mod crypto;
pub mod rate_limit;
