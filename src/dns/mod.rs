//! Target address resolution
//!
//! Resolution happens exactly once at startup. Literal IP strings skip DNS
//! entirely; names go through a `trust-dns` resolver built from the system
//! configuration (hosts file included). The first address allowed by the
//! [`NetworkPreference`] wins.

use crate::{
    error::{AppError, ErrorContext, Result},
    models::Target,
    types::{AddressFamily, NetworkPreference},
};
use std::net::IpAddr;
use trust_dns_resolver::{system_conf, TokioAsyncResolver};

/// Resolves a user-supplied host into a probe [`Target`]
#[derive(Debug, Clone, Default)]
pub struct AddressResolver {
    preference: NetworkPreference,
}

impl AddressResolver {
    pub fn new(preference: NetworkPreference) -> Self {
        Self { preference }
    }

    pub fn preference(&self) -> NetworkPreference {
        self.preference
    }

    /// Resolve `host` to a single canonical address and its family
    pub async fn resolve(&self, host: &str) -> Result<Target> {
        let host = host.trim();
        if host.is_empty() {
            return Err(AppError::config("A target host or IP address is required"));
        }

        if let Some(ip) = parse_literal(host) {
            let (address, family) = classify(ip);
            if !self.preference.allows(family) {
                return Err(AppError::dns_resolution(format!(
                    "{} is an {} address but the network override requires {}",
                    host, family, self.preference
                )));
            }
            return Ok(Target::new(host, address, family));
        }

        let resolver = system_resolver(host)?;
        let response = resolver
            .lookup_ip(host)
            .await
            .with_context(|| format!("DNS lookup failed for {}", host))?;

        let candidates: Vec<IpAddr> = response.iter().collect();
        self.select(host, &candidates)
    }

    /// Pick the first candidate compatible with the preference
    pub fn select(&self, host: &str, candidates: &[IpAddr]) -> Result<Target> {
        if candidates.is_empty() {
            return Err(AppError::dns_resolution(format!("No addresses found for {}", host)));
        }

        candidates
            .iter()
            .map(|ip| classify(*ip))
            .find(|(_, family)| self.preference.allows(*family))
            .map(|(address, family)| Target::new(host, address, family))
            .ok_or_else(|| {
                AppError::dns_resolution(format!(
                    "No {} address found for {}",
                    self.preference, host
                ))
            })
    }
}

/// Canonicalise an address and determine the family used to probe it.
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are IPv4.
pub fn classify(ip: IpAddr) -> (IpAddr, AddressFamily) {
    match ip {
        IpAddr::V4(v4) => (IpAddr::V4(v4), AddressFamily::Ipv4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => (IpAddr::V4(v4), AddressFamily::Ipv4),
            None => (IpAddr::V6(v6), AddressFamily::Ipv6),
        },
    }
}

/// Accept plain literals as well as bracketed IPv6 (`[::1]`)
pub(crate) fn parse_literal(host: &str) -> Option<IpAddr> {
    let unbracketed = host
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(host);
    unbracketed.parse().ok()
}

fn system_resolver(host: &str) -> Result<TokioAsyncResolver> {
    let (config, opts) = system_conf::read_system_conf().map_err(|e| {
        AppError::dns_resolution(format!("Cannot resolve {}: failed to read system DNS config: {}", host, e))
    })?;
    Ok(TokioAsyncResolver::tokio(config, opts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_classify_ipv4() {
        assert_eq!(classify(ip("192.0.2.7")), (ip("192.0.2.7"), AddressFamily::Ipv4));
    }

    #[test]
    fn test_classify_ipv6() {
        assert_eq!(classify(ip("2001:db8::1")), (ip("2001:db8::1"), AddressFamily::Ipv6));
        assert_eq!(classify(ip("::1")), (ip("::1"), AddressFamily::Ipv6));
    }

    #[test]
    fn test_classify_ipv4_mapped() {
        assert_eq!(classify(ip("::ffff:10.1.2.3")), (ip("10.1.2.3"), AddressFamily::Ipv4));
    }

    #[tokio::test]
    async fn test_resolve_ipv4_literal() {
        let target = AddressResolver::default().resolve("127.0.0.1").await.unwrap();
        assert_eq!(target.host, "127.0.0.1");
        assert_eq!(target.address, ip("127.0.0.1"));
        assert_eq!(target.family, AddressFamily::Ipv4);
    }

    #[tokio::test]
    async fn test_resolve_bracketed_ipv6_literal() {
        let target = AddressResolver::default().resolve("[::1]").await.unwrap();
        assert_eq!(target.address, ip("::1"));
        assert_eq!(target.family, AddressFamily::Ipv6);
    }

    #[tokio::test]
    async fn test_resolve_literal_against_preference() {
        let v6_only = AddressResolver::new(NetworkPreference::Ipv6Only);
        let result = v6_only.resolve("127.0.0.1").await;
        assert!(matches!(result, Err(AppError::DnsResolution(_))));

        let v4_only = AddressResolver::new(NetworkPreference::Ipv4Only);
        let target = v4_only.resolve("::ffff:127.0.0.1").await.unwrap();
        assert_eq!(target.address, ip("127.0.0.1"));
        assert_eq!(target.family, AddressFamily::Ipv4);
    }

    #[tokio::test]
    async fn test_resolve_empty_host() {
        let result = AddressResolver::default().resolve("  ").await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_resolve_unresolvable_host() {
        // .invalid is reserved and never resolves; without a resolver config
        // this still fails as a resolution error.
        let result = AddressResolver::default()
            .resolve("no-such-host.invalid")
            .await;
        assert!(matches!(result, Err(AppError::DnsResolution(_))));
    }

    #[test]
    fn test_select_first_candidate() {
        let resolver = AddressResolver::default();
        let candidates = [ip("2001:db8::5"), ip("192.0.2.5")];
        let target = resolver.select("example.test", &candidates).unwrap();
        assert_eq!(target.address, ip("2001:db8::5"));
        assert_eq!(target.family, AddressFamily::Ipv6);
        assert_eq!(target.host, "example.test");
    }

    #[test]
    fn test_select_honours_preference() {
        let resolver = AddressResolver::new(NetworkPreference::Ipv4Only);
        let candidates = [ip("2001:db8::5"), ip("192.0.2.5")];
        let target = resolver.select("example.test", &candidates).unwrap();
        assert_eq!(target.address, ip("192.0.2.5"));
        assert_eq!(target.family, AddressFamily::Ipv4);
    }

    #[test]
    fn test_select_no_matching_family() {
        let resolver = AddressResolver::new(NetworkPreference::Ipv6Only);
        let result = resolver.select("example.test", &[ip("192.0.2.5")]);
        assert!(matches!(result, Err(AppError::DnsResolution(_))));
    }

    #[test]
    fn test_select_empty_answer() {
        let result = AddressResolver::default().select("example.test", &[]);
        assert!(matches!(result, Err(AppError::DnsResolution(_))));
    }
}
