//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (RESTRICT_IPS, ALLOWED_IPS, ...)
//! 2. Configuration file (TOML)
//! 3. Default values
//!
//! Environment values use their own parsing rules rather than the generic
//! `Environment` source: a boolean variable is true only for
//! case-insensitive `"true"` or literal `"1"`, and any other present value
//! resolves to false without falling through to the settings file. List
//! variables are comma-separated, trimmed, with empty elements discarded.
//! No IP or CIDR syntax is validated here; malformed entries are handled
//! at match time.

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, File, FileFormat};
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "ipgate.toml",
    ".ipgate.toml",
    "~/.config/ipgate/config.toml",
    "/etc/ipgate/config.toml",
];

/// Boolean environment variables and the config keys they override
const BOOL_ENV_KEYS: &[(&str, &str)] = &[
    ("RESTRICT_IPS", "restriction.restrict_ips"),
    ("ALLOW_ADMIN", "restriction.allow_admin"),
    ("ALLOW_AUTHENTICATED", "restriction.allow_authenticated"),
    ("RESTRICT_ADMIN_BY_IPS", "restriction.restrict_admin_by_ips"),
];

/// List environment variables and the config keys they override
const LIST_ENV_KEYS: &[(&str, &str)] = &[
    ("ALLOWED_IPS", "restriction.allowed_ips"),
    ("ALLOWED_IP_RANGES", "restriction.allowed_ip_ranges"),
    ("ALLOWED_ADMIN_IPS", "restriction.allowed_admin_ips"),
    ("ALLOWED_ADMIN_IP_RANGES", "restriction.allowed_admin_ip_ranges"),
];

/// Load configuration from a TOML string (useful for testing)
///
/// Skips the environment overrides so tests see the file contents alone.
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Start with defaults (handled by serde defaults on AppConfig)

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Apply environment overrides (environment wins over the file)
    builder = apply_env_overrides(builder)?;

    // Build and deserialize
    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))
}

/// Apply restriction-rule overrides from the process environment.
///
/// A variable that is set always overrides the file value, even when its
/// text is malformed: a bad boolean becomes `false`, never the file's
/// value.
fn apply_env_overrides(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    for (env_key, config_key) in BOOL_ENV_KEYS {
        if let Ok(value) = std::env::var(env_key) {
            builder = builder
                .set_override(*config_key, parse_env_bool(&value))
                .map_err(|e| ConfigError::Load(e.to_string()))?;
        }
    }

    for (env_key, config_key) in LIST_ENV_KEYS {
        if let Ok(value) = std::env::var(env_key) {
            builder = builder
                .set_override(*config_key, split_env_list(&value))
                .map_err(|e| ConfigError::Load(e.to_string()))?;
        }
    }

    Ok(builder)
}

/// Parse a boolean environment value.
///
/// True only for case-insensitive `"true"` or literal `"1"`.
fn parse_env_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

/// Split a comma-separated environment value into trimmed, non-empty elements.
fn split_env_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|element| !element.is_empty())
        .map(str::to_string)
        .collect()
}
