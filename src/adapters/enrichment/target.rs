//! Fetch-target guard for user-supplied references.
//!
//! Only public hosts may be fetched: `localhost` and IP literals in the
//! loopback, private, link-local, shared or unspecified ranges are refused,
//! both for the first request and for every redirect hop.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use reqwest::Url;

use crate::ports::EvidenceError;

/// Rejects URLs that are not plain http(s) requests to a public host.
pub(crate) fn ensure_public_target(url: &Url) -> Result<(), EvidenceError> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(EvidenceError::invalid_reference(format!(
            "unsupported scheme in {}",
            url
        )));
    }
    let host = url
        .host_str()
        .ok_or_else(|| EvidenceError::invalid_reference(format!("no host in {}", url)))?
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim_end_matches('.')
        .to_ascii_lowercase();

    if host == "localhost" || host.ends_with(".localhost") {
        return Err(EvidenceError::invalid_reference("blocked localhost host"));
    }
    if let Ok(ip) = host.parse::<IpAddr>() {
        if is_internal(ip) {
            return Err(EvidenceError::invalid_reference(format!(
                "blocked internal address {}",
                ip
            )));
        }
    }
    Ok(())
}

fn is_internal(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_internal_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_internal_v4(v4),
            None => is_internal_v6(v6),
        },
    }
}

fn is_internal_v4(ip: Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_broadcast()
        || ip.is_unspecified()
        // 100.64.0.0/10 carrier-grade NAT
        || (a == 100 && (b & 0xc0) == 64)
}

fn is_internal_v6(ip: Ipv6Addr) -> bool {
    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link local
        || (first & 0xffc0) == 0xfe80
}
