//! Axum middleware adapter
//!
//! Bridges the access gate to an axum service: extracts the candidate
//! client addresses from the request, classifies the route, reads the
//! authentication marker, and maps the gate's verdict to a response.
//! `Forbidden` becomes 403, `NotFound` becomes 404, and `Continue` hands
//! the request to the next layer unmodified.
//!
//! Route classification and authentication stay outside the engine: the
//! classifier is a trait object owned by the layer state, and upstream
//! authentication middleware marks requests by inserting
//! [`Authenticated`] into the request extensions.

use crate::access_control::extract::{FORWARDED_FOR_HEADER, client_candidates};
use crate::access_control::{AccessGate, RequestContext, RouteClass, Verdict};
use crate::config::{RestrictionConfig, ServerConfig};
use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;

/// Marker inserted into request extensions by an upstream
/// authentication layer. Its presence means the request is
/// authenticated.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated;

/// Classifies a request path into a route class
pub trait RouteClassifier: Send + Sync {
    fn classify(&self, path: &str) -> RouteClass;
}

/// Classifier treating one path prefix as the admin surface
#[derive(Debug, Clone)]
pub struct PathPrefixClassifier {
    prefix: String,
    prefix_slash: String,
}

impl PathPrefixClassifier {
    pub fn new(admin_prefix: impl Into<String>) -> Self {
        let prefix = admin_prefix.into().trim_end_matches('/').to_string();
        let prefix_slash = format!("{prefix}/");
        Self {
            prefix,
            prefix_slash,
        }
    }
}

impl Default for PathPrefixClassifier {
    fn default() -> Self {
        Self::new("/admin")
    }
}

impl RouteClassifier for PathPrefixClassifier {
    fn classify(&self, path: &str) -> RouteClass {
        if path == self.prefix || path.starts_with(&self.prefix_slash) {
            RouteClass::Admin
        } else {
            RouteClass::General
        }
    }
}

/// Shared state for the restriction middleware
#[derive(Clone)]
pub struct RestrictionState {
    pub gate: Arc<AccessGate>,
    pub classifier: Arc<dyn RouteClassifier>,
}

impl RestrictionState {
    pub fn new(gate: Arc<AccessGate>, classifier: Arc<dyn RouteClassifier>) -> Self {
        Self { gate, classifier }
    }

    /// Build state straight from configuration, with the prefix
    /// classifier from the server settings.
    pub fn from_config(restriction: &RestrictionConfig, server: &ServerConfig) -> Self {
        Self {
            gate: Arc::new(AccessGate::new(restriction)),
            classifier: Arc::new(PathPrefixClassifier::new(server.admin_prefix.clone())),
        }
    }
}

/// Per-request enforcement, installed with
/// `axum::middleware::from_fn_with_state`.
///
/// The router must be served with
/// `into_make_service_with_connect_info::<SocketAddr>()` so the peer
/// address is available as a fallback when no forwarding header is
/// present.
pub async fn enforce(
    State(state): State<RestrictionState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    let forwarded = req
        .headers()
        .get(FORWARDED_FOR_HEADER)
        .and_then(|value| value.to_str().ok());

    let candidates = client_candidates(forwarded, peer.ip());
    let route = state.classifier.classify(req.uri().path());
    let authenticated = req.extensions().get::<Authenticated>().is_some();

    let ctx = RequestContext::new(candidates, route, authenticated);

    match state.gate.evaluate(&ctx) {
        Verdict::Continue => next.run(req).await,
        Verdict::Forbidden => StatusCode::FORBIDDEN.into_response(),
        Verdict::NotFound => StatusCode::NOT_FOUND.into_response(),
    }
}
