//! Address and range matching
//!
//! Matches candidate client addresses against an exact allow-set and a
//! list of CIDR allow-ranges. Exact matching is a literal string
//! comparison: an equivalent but differently formatted address (e.g.
//! `192.168.000.1` for `192.168.0.1`) does not match. Range entries are
//! kept as raw strings and parsed per check, so a malformed entry is a
//! logged skip at match time rather than a load failure.

use crate::error::{AddressError, RangeError};
use ipnet::IpNet;
use std::collections::HashSet;
use std::net::IpAddr;
use tracing::{debug, warn};

/// Matcher over one allow-list and one allow-range list
#[derive(Debug, Clone)]
pub struct IpMatcher {
    /// Exact-match entries, compared as literal text
    allowed: HashSet<String>,

    /// CIDR range entries, parsed at match time
    ranges: Vec<String>,
}

impl IpMatcher {
    /// Create a matcher from configured allow entries.
    ///
    /// No syntax validation happens here; malformed range entries are
    /// detected (and skipped) when a check runs.
    pub fn new(allowed: &[String], ranges: &[String]) -> Self {
        Self {
            allowed: allowed.iter().cloned().collect(),
            ranges: ranges.to_vec(),
        }
    }

    /// Whether this matcher can never allow anything
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty() && self.ranges.is_empty()
    }

    /// Check an ordered candidate list against the allow rules.
    ///
    /// Blocked unless proven otherwise: the first candidate matching an
    /// exact entry or falling inside a range allows the whole request. A
    /// candidate that fails to parse is a non-match for the range step
    /// only and evaluation continues with the next candidate.
    pub fn is_blocked(&self, candidates: &[String]) -> bool {
        for candidate in candidates {
            match self.candidate_allowed(candidate) {
                Ok(true) => return false,
                Ok(false) => {}
                Err(err) => {
                    debug!(candidate = %candidate, error = %err, "skipping unparsable candidate");
                }
            }
        }

        true
    }

    /// Check a single candidate against the allow rules.
    ///
    /// The exact-match comparison runs first and needs no parsing, so it
    /// still applies to candidates that are not valid addresses. Range
    /// membership requires a parsed address; the error carries that
    /// failure to the caller.
    fn candidate_allowed(&self, candidate: &str) -> Result<bool, AddressError> {
        if self.allowed.contains(candidate) {
            return Ok(true);
        }

        let address: IpAddr = candidate
            .parse()
            .map_err(|source| AddressError::new(candidate, source))?;

        for range in &self.ranges {
            match parse_network(range) {
                Ok(network) => {
                    if network.contains(&address) {
                        return Ok(true);
                    }
                }
                Err(err) => {
                    warn!(range = %range, error = %err, "skipping malformed allow-range entry");
                }
            }
        }

        Ok(false)
    }
}

/// Parse an allow-range entry as a strictly aligned CIDR network.
///
/// A bare address (no prefix) is accepted as a single-host network. An
/// entry with host bits set under its prefix (`127.0.0.1/30`) is
/// malformed.
fn parse_network(range: &str) -> Result<IpNet, RangeError> {
    let network: IpNet = match range.parse() {
        Ok(network) => network,
        Err(err) => match range.parse::<IpAddr>() {
            Ok(address) => IpNet::from(address),
            Err(_) => return Err(RangeError::Parse(err)),
        },
    };

    if network.addr() != network.network() {
        return Err(RangeError::HostBits);
    }

    Ok(network)
}
