//! ipgate
//!
//! An inbound-request IP access-control filter for axum services.
//!
//! ## Features
//!
//! - **Allow-list filtering** - exact addresses and CIDR ranges, IPv4 and IPv6
//! - **Layered bypasses** - admin routes and authenticated requests can skip
//!   the general filter
//! - **Independent admin filter** - a stricter allow-list for the admin
//!   surface that rejects with 404, hiding it from disallowed callers
//! - **Layered configuration** - environment variables over a TOML settings
//!   file over typed defaults
//!
//! ## Decision model
//!
//! ```text
//! general filter (restrict_ips, 403)  →  admin filter (restrict_admin_by_ips, 404)
//! ```
//!
//! The general filter applies to every route unless bypassed by
//! `allow_admin` (admin routes) or `allow_authenticated` (authenticated
//! requests); its rejection is final. The admin filter applies to admin
//! routes whenever enabled, with its own allow rules, even when the
//! general filter is off.
//!
//! ## Example Configuration
//!
//! ```toml
//! [restriction]
//! restrict_ips = true
//! allowed_ips = ["203.0.113.7"]
//! allowed_ip_ranges = ["10.0.0.0/8"]
//! allow_authenticated = true
//!
//! restrict_admin_by_ips = true
//! allowed_admin_ip_ranges = ["10.1.0.0/16"]
//! ```
//!
//! Every key can be overridden from the environment (`RESTRICT_IPS`,
//! `ALLOWED_IPS`, `ALLOWED_IP_RANGES`, `ALLOW_ADMIN`,
//! `ALLOW_AUTHENTICATED`, `RESTRICT_ADMIN_BY_IPS`, `ALLOWED_ADMIN_IPS`,
//! `ALLOWED_ADMIN_IP_RANGES`); list values are comma-separated.
//!
//! ## Usage
//!
//! ```ignore
//! let config = ipgate::load_config(None)?;
//! let state = RestrictionState::from_config(&config.restriction, &config.server);
//! let app = Router::new()
//!     .route("/", get(index))
//!     .layer(axum::middleware::from_fn_with_state(state, ipgate::middleware::enforce));
//! axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
//! ```

pub mod access_control;
pub mod config;
pub mod error;
pub mod middleware;

// Re-export main types
pub use access_control::{AccessGate, IpMatcher, RequestContext, RouteClass, Verdict};
pub use config::{AppConfig, RestrictionConfig, load_config, load_config_from_str};
pub use error::{AppError, Result};
pub use middleware::{Authenticated, PathPrefixClassifier, RestrictionState, RouteClassifier};
