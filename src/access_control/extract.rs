//! Client address extraction
//!
//! Produces the ordered candidate list for a request: the comma-separated
//! chain from the forwarding header when one is present, otherwise the
//! transport-level peer address. PaaS platforms and reverse proxies
//! append traversed hops to `X-Forwarded-For`, so the raw peer address
//! alone often reflects internal routing rather than the client.

use std::net::IpAddr;

/// Header carrying the proxy-appended chain of client addresses
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Build the ordered candidate address list for a request.
///
/// A present, non-empty forwarding header is split on commas with each
/// element trimmed; header order is preserved, nothing is deduped. A
/// header that trims down to nothing falls back to the peer address, so
/// the result always holds at least one candidate. No validation happens
/// here; candidates may fail to parse downstream.
pub fn client_candidates(forwarded: Option<&str>, peer: IpAddr) -> Vec<String> {
    if let Some(header) = forwarded {
        let candidates: Vec<String> = header
            .split(',')
            .map(str::trim)
            .filter(|element| !element.is_empty())
            .map(str::to_string)
            .collect();

        if !candidates.is_empty() {
            return candidates;
        }
    }

    vec![peer.to_string()]
}
