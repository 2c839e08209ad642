//! Configuration types for ipgate
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings (demo binary)
    pub server: ServerConfig,

    /// IP restriction rules
    pub restriction: RestrictionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Path prefix classified as the admin surface
    pub admin_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8460,
            admin_prefix: "/admin".to_string(),
        }
    }
}

/// IP restriction rules
///
/// Two independent filters share this snapshot:
///
/// 1. The general filter (`restrict_ips`) applies to every route and
///    rejects disallowed clients with 403. Admin routes (`allow_admin`)
///    and authenticated requests (`allow_authenticated`) can bypass it.
/// 2. The admin filter (`restrict_admin_by_ips`) applies only to admin
///    routes and rejects disallowed clients with 404, hiding the admin
///    surface instead of revealing a permission boundary.
///
/// Exact entries match on the literal address text; a differently
/// formatted but equivalent address (`192.168.000.1`) does not match.
/// Range entries are CIDR strings, validated lazily at match time so a
/// malformed entry degrades to a logged skip rather than a load failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RestrictionConfig {
    /// Master switch for the general filter
    pub restrict_ips: bool,

    /// Exact addresses always allowed by the general filter
    pub allowed_ips: Vec<String>,

    /// CIDR ranges allowed by the general filter
    pub allowed_ip_ranges: Vec<String>,

    /// Admin routes bypass the general filter
    pub allow_admin: bool,

    /// Authenticated requests bypass the general filter
    pub allow_authenticated: bool,

    /// Master switch for the admin filter
    pub restrict_admin_by_ips: bool,

    /// Exact addresses allowed by the admin filter
    pub allowed_admin_ips: Vec<String>,

    /// CIDR ranges allowed by the admin filter
    pub allowed_admin_ip_ranges: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// Structured JSON output
    Json,
}
