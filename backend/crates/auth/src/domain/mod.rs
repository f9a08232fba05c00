//! Domain Layer

pub mod credentials;

pub use credentials::AdminCredentials;
