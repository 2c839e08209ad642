//! Access gate
//!
//! Evaluates the rule hierarchy for a request context and returns a
//! verdict. Evaluation order, first matching rule wins:
//!
//! 1. With `restrict_ips` set: admin routes under `allow_admin` and
//!    authenticated requests under `allow_authenticated` bypass the
//!    general filter; anyone else not matching the general allow rules
//!    is rejected with `Forbidden`, which is final.
//! 2. With `restrict_admin_by_ips` set and an admin route: a client not
//!    matching the admin allow rules is rejected with `NotFound`. This
//!    filter runs whether or not the general filter is enabled, so the
//!    admin surface can be locked down on an otherwise open service.
//! 3. Otherwise `Continue`.

use crate::access_control::matcher::IpMatcher;
use crate::access_control::types::{RequestContext, Verdict};
use crate::config::RestrictionConfig;
use tracing::debug;

/// Compiled access gate, shared read-only across requests
#[derive(Debug, Clone)]
pub struct AccessGate {
    restrict_ips: bool,
    allow_admin: bool,
    allow_authenticated: bool,
    restrict_admin_by_ips: bool,
    general: IpMatcher,
    admin: IpMatcher,
}

impl AccessGate {
    /// Build a gate from a configuration snapshot.
    ///
    /// Exact allow entries are folded into hash sets; range entries are
    /// carried verbatim and parsed at match time.
    pub fn new(config: &RestrictionConfig) -> Self {
        Self {
            restrict_ips: config.restrict_ips,
            allow_admin: config.allow_admin,
            allow_authenticated: config.allow_authenticated,
            restrict_admin_by_ips: config.restrict_admin_by_ips,
            general: IpMatcher::new(&config.allowed_ips, &config.allowed_ip_ranges),
            admin: IpMatcher::new(&config.allowed_admin_ips, &config.allowed_admin_ip_ranges),
        }
    }

    /// Whether any filtering is configured at all
    pub fn is_active(&self) -> bool {
        self.restrict_ips || self.restrict_admin_by_ips
    }

    /// Evaluate the rule hierarchy for one request.
    ///
    /// Pure and infallible: malformed candidates and malformed range
    /// entries degrade to non-matches inside the matcher, never errors.
    pub fn evaluate(&self, ctx: &RequestContext) -> Verdict {
        if self.restrict_ips {
            let bypassed = (ctx.route.is_admin() && self.allow_admin)
                || (ctx.authenticated && self.allow_authenticated);

            if !bypassed && self.general.is_blocked(&ctx.candidates) {
                debug!(
                    route = %ctx.route,
                    candidates = ?ctx.candidates,
                    "request blocked by general filter"
                );
                return Verdict::Forbidden;
            }
        }

        if ctx.route.is_admin()
            && self.restrict_admin_by_ips
            && self.admin.is_blocked(&ctx.candidates)
        {
            debug!(
                candidates = ?ctx.candidates,
                "request blocked by admin filter"
            );
            return Verdict::NotFound;
        }

        Verdict::Continue
    }
}
