use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Resolves the client key for a request, preferring proxy-supplied headers
/// over the transport peer so deployments behind a reverse proxy or
/// Cloudflare attribute requests to the true origin.
///
/// Precedence: first entry of `X-Forwarded-For`, then `CF-Connecting-IP`,
/// then the peer address. The value is used as an opaque key; nothing is
/// validated or normalized.
///
/// Deployment precondition: these headers are client-controllable, so the
/// service must sit behind a proxy that sets them authoritatively for the
/// resolved key to mean anything.
pub fn resolve(headers: &HeaderMap, peer: SocketAddr) -> String {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(cf_ip) = header_str(headers, "cf-connecting-ip") {
        return cf_ip.to_string();
    }
    peer.ip().to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> SocketAddr {
        "10.0.0.1:54321".parse().unwrap()
    }

    #[test]
    fn forwarded_for_takes_first_entry_and_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "1.2.3.4, 5.6.7.8".parse().unwrap());
        headers.insert("cf-connecting-ip", "9.9.9.9".parse().unwrap());
        assert_eq!(resolve(&headers, peer()), "1.2.3.4");
    }

    #[test]
    fn cloudflare_header_used_when_no_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-connecting-ip", "9.9.9.9".parse().unwrap());
        assert_eq!(resolve(&headers, peer()), "9.9.9.9");
    }

    #[test]
    fn falls_back_to_peer_address() {
        assert_eq!(resolve(&HeaderMap::new(), peer()), "10.0.0.1");
    }

    #[test]
    fn empty_forwarded_for_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "".parse().unwrap());
        assert_eq!(resolve(&headers, peer()), "10.0.0.1");
    }

    #[test]
    fn forwarded_entries_are_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "  1.2.3.4 ,5.6.7.8".parse().unwrap());
        assert_eq!(resolve(&headers, peer()), "1.2.3.4");
    }
}
