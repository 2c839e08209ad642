//! Error types for ipgate
//!
//! This module defines the error hierarchy used throughout the crate.
//! We use `thiserror` for library-style errors that are part of the API.
//! Access denials are not errors: they are verdicts, surfaced to clients
//! as HTTP status codes by the middleware layer.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A client address candidate that is not a textual IPv4/IPv6 address.
///
/// Produced when a forwarding-header element (or the peer address) fails
/// to parse. The matcher recovers by treating the candidate as a
/// non-match for range membership; the exact-match check has already run
/// by then, since it is a plain string comparison.
#[derive(Error, Debug)]
#[error("invalid client address '{address}'")]
pub struct AddressError {
    pub address: String,
    #[source]
    pub source: std::net::AddrParseError,
}

impl AddressError {
    pub fn new(address: impl Into<String>, source: std::net::AddrParseError) -> Self {
        Self {
            address: address.into(),
            source,
        }
    }
}

/// A malformed allow-range configuration entry.
///
/// Never fatal: the matcher logs the entry and skips it, so one bad
/// range cannot disable matching against the valid ones.
#[derive(Error, Debug)]
pub enum RangeError {
    #[error("not a valid network address: {0}")]
    Parse(#[from] ipnet::AddrParseError),

    #[error("host bits set")]
    HostBits,
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;
