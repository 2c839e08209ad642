//! Access control module
//!
//! Decides, per incoming request, whether the client's originating
//! address is allowed to proceed.
//!
//! ## Decision model
//!
//! Two independent filters are evaluated in order:
//!
//! 1. **General filter** (`restrict_ips`) - applies to every route.
//!    Admin routes (`allow_admin`) and authenticated requests
//!    (`allow_authenticated`) bypass it; everyone else must match the
//!    allow-list or an allow-range, or the request is rejected with 403.
//!    A rejection here is final.
//! 2. **Admin filter** (`restrict_admin_by_ips`) - applies to admin
//!    routes only, with its own allow-list and ranges, whenever the
//!    general filter did not reject. A blocked client receives 404
//!    rather than 403, hiding the existence of the admin surface.
//!
//! Within a filter, candidates from the forwarding header are tried in
//! header order; any candidate matching an exact entry (literal string
//! comparison) or falling inside a CIDR range allows the request.
//!
//! The engine is a pure function of the configuration snapshot and the
//! per-request context. Route classification and authentication are
//! supplied by the caller as plain values; the engine never consults
//! routing or session state itself.

pub mod extract;
pub mod gate;
pub mod matcher;
pub mod types;

pub use extract::client_candidates;
pub use gate::AccessGate;
pub use matcher::IpMatcher;
pub use types::{RequestContext, RouteClass, Verdict};
