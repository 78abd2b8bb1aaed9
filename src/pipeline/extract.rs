//! Address extraction from tagged address lists.

use crate::config::{IPV4_TAG, IPV6_TAG};

/// Returns the first IP literal in a tagged address list, without its tag.
///
/// Only `ipv4:` and `ipv6:` entries count. The first one is taken on the
/// assumption that the outermost IP layer holds the globally routable address.
/// Returns an empty string when the list has no IP entry.
pub fn first_ip_address(addresses: &[String]) -> &str {
    addresses
        .iter()
        .find_map(|entry| {
            entry
                .strip_prefix(IPV4_TAG)
                .or_else(|| entry.strip_prefix(IPV6_TAG))
        })
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_ipv4_entry() {
        let addrs = list(&["mac:00:11:22:33:44:55", "ipv4:8.8.8.8", "udp:53"]);
        assert_eq!(first_ip_address(&addrs), "8.8.8.8");
    }

    #[test]
    fn test_first_ipv6_entry() {
        let addrs = list(&["ipv6:2001:4860:4860::8888", "tcp:443"]);
        assert_eq!(first_ip_address(&addrs), "2001:4860:4860::8888");
    }

    #[test]
    fn test_outer_address_wins() {
        // Tunnelled traffic: outer IPv4 carrier, inner IPv6 payload
        let addrs = list(&["ipv4:203.0.113.7", "ipv6:fe80::1", "ipv4:10.0.0.1"]);
        assert_eq!(first_ip_address(&addrs), "203.0.113.7");
    }

    #[test]
    fn test_no_ip_entries() {
        let addrs = list(&["mac:00:11:22:33:44:55", "tcp:443", "ipx:1234"]);
        assert_eq!(first_ip_address(&addrs), "");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(first_ip_address(&[]), "");
    }

    #[test]
    fn test_tag_is_case_sensitive() {
        let addrs = list(&["IPV4:8.8.8.8", "ipv4:1.2.3.4"]);
        assert_eq!(first_ip_address(&addrs), "1.2.3.4");
    }

    #[test]
    fn test_empty_literal_after_tag() {
        // The tag alone still counts as the first entry; lookup rejects ""
        let addrs = list(&["ipv4:", "ipv4:8.8.8.8"]);
        assert_eq!(first_ip_address(&addrs), "");
    }
}
