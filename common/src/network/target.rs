//! # Target Specification Model
//!
//! Turns the operator's `--target` string into the ordered sequence of hosts
//! a sweep visits.
//!
//! Two forms are accepted:
//! * **Host**: a hostname or IP literal, kept verbatim (no DNS lookup).
//! * **CIDR**: `address/prefix`, expanded to every address of the block in
//!   ascending order, network and broadcast addresses included.
//!
//! Resolution is a pure function of the string. The resulting [`Hosts`] can be
//! iterated any number of times and always yields the same sequence.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::DispatchError;
use crate::network::range::{self, IpRange};

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// A parsed target specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// A single host, kept exactly as typed.
    Host { host: String },
    /// Every address of a CIDR block.
    Network { literal: String, range: IpRange },
}

impl FromStr for TargetSpec {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('/') {
            return parse_cidr(s);
        }
        parse_host(s)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host { host } => f.write_str(host),
            Self::Network { literal, .. } => f.write_str(literal),
        }
    }
}

impl TargetSpec {
    /// The host sequence this specification denotes.
    pub fn hosts(&self) -> Hosts {
        match self {
            Self::Host { host } => Hosts::Single(host.clone()),
            Self::Network { range, .. } => Hosts::Range(*range),
        }
    }
}

/// Resolves a target specification string into its host sequence.
pub fn resolve(spec: &str) -> Result<Hosts, DispatchError> {
    spec.parse::<TargetSpec>().map(|target| target.hosts())
}

/// Finite, restartable sequence of host identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hosts {
    Single(String),
    Range(IpRange),
}

impl Hosts {
    pub fn iter(&self) -> HostIter {
        match self {
            Self::Single(host) => HostIter::Single(Some(host.clone())),
            Self::Range(IpRange::V4(r)) => HostIter::V4(u32::from(r.start_addr)..=u32::from(r.end_addr)),
            Self::Range(IpRange::V6(r)) => HostIter::V6(u128::from(r.start_addr)..=u128::from(r.end_addr)),
        }
    }

    /// Number of hosts; saturates at `u128::MAX` for the full IPv6 space.
    pub fn len(&self) -> u128 {
        match self {
            Self::Single(_) => 1,
            Self::Range(range) => range.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IntoIterator for &Hosts {
    type Item = String;
    type IntoIter = HostIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over [`Hosts`]; addresses are rendered on demand.
#[derive(Debug, Clone)]
pub enum HostIter {
    Single(Option<String>),
    V4(std::ops::RangeInclusive<u32>),
    V6(std::ops::RangeInclusive<u128>),
}

impl Iterator for HostIter {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Single(host) => host.take(),
            Self::V4(addrs) => addrs.next().map(|a| Ipv4Addr::from(a).to_string()),
            Self::V6(addrs) => addrs.next().map(|a| Ipv6Addr::from(a).to_string()),
        }
    }
}

fn invalid(spec: &str, reason: impl Into<String>) -> DispatchError {
    DispatchError::InvalidSpecification {
        spec: spec.to_string(),
        reason: reason.into(),
    }
}

/// Parses CIDR notation like "192.168.1.0/24" or "2001:db8::/126".
fn parse_cidr(s: &str) -> Result<TargetSpec, DispatchError> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Err(invalid(s, "missing prefix length"));
    };

    let ip_addr = ip_str
        .parse::<IpAddr>()
        .map_err(|e| invalid(s, format!("invalid network address '{ip_str}': {e}")))?;

    // u8 parsing alone would accept "+24"
    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(s, format!("invalid prefix length '{prefix_str}'")));
    }
    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| invalid(s, format!("invalid prefix length '{prefix_str}': {e}")))?;

    let range = range::cidr_range(ip_addr, prefix).map_err(|e| invalid(s, e.to_string()))?;

    Ok(TargetSpec::Network {
        literal: s.to_string(),
        range,
    })
}

/// Accepts IP literals and RFC 1123 hostnames (underscores tolerated for
/// NetBIOS-style names).
fn parse_host(s: &str) -> Result<TargetSpec, DispatchError> {
    if s.parse::<IpAddr>().is_ok() || is_scoped_ipv6(s) {
        return Ok(TargetSpec::Host { host: s.to_string() });
    }

    if s.is_empty() {
        return Err(invalid(s, "empty host"));
    }
    if s.len() > MAX_HOSTNAME_LEN {
        return Err(invalid(s, format!("host longer than {MAX_HOSTNAME_LEN} characters")));
    }

    let name = s.strip_suffix('.').unwrap_or(s);
    for label in name.split('.') {
        check_label(label).map_err(|reason| invalid(s, reason))?;
    }

    // "10.0.0.256" is a broken address, not a hostname
    if name
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(invalid(s, "not a valid IP address"));
    }

    Ok(TargetSpec::Host { host: s.to_string() })
}

/// `fe80::1%eth0`: a link-local literal with a zone index.
fn is_scoped_ipv6(s: &str) -> bool {
    let Some((addr, zone)) = s.split_once('%') else {
        return false;
    };
    addr.parse::<Ipv6Addr>().is_ok()
        && !zone.is_empty()
        && zone
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn check_label(label: &str) -> Result<(), String> {
    if label.is_empty() {
        return Err("empty label".to_string());
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(format!("label '{label}' longer than {MAX_LABEL_LEN} characters"));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(format!("label '{label}' starts or ends with '-'"));
    }
    if let Some(c) = label
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(format!("unexpected character {c:?}"));
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
