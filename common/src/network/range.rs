//! # Address Range Model
//!
//! Continuous, inclusive address ranges as produced by CIDR expansion.
//! Ranges are plain values: iterating one never consumes it.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use pnet::ipnetwork::{Ipv4Network, Ipv6Network};

/// Continuous range of IPv4 addresses, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Ipv4Addr> + Clone + use<> {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> u128 {
        let start: u32 = u32::from(self.start_addr);
        let end: u32 = u32::from(self.end_addr);
        if start > end {
            return 0;
        }
        u128::from(end - start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Continuous range of IPv6 addresses, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv6Range {
    pub start_addr: Ipv6Addr,
    pub end_addr: Ipv6Addr,
}

impl Ipv6Range {
    pub fn new(start_addr: Ipv6Addr, end_addr: Ipv6Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    /// Saturates at `u128::MAX` for `::/0`.
    pub fn len(&self) -> u128 {
        let start: u128 = u128::from(self.start_addr);
        let end: u128 = u128::from(self.end_addr);
        if start > end {
            return 0;
        }
        (end - start).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A CIDR block expanded to its first and last address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpRange {
    V4(Ipv4Range),
    V6(Ipv6Range),
}

impl IpRange {
    pub fn len(&self) -> u128 {
        match self {
            Self::V4(range) => range.len(),
            Self::V6(range) => range.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn first(&self) -> IpAddr {
        match self {
            Self::V4(range) => IpAddr::V4(range.start_addr),
            Self::V6(range) => IpAddr::V6(range.start_addr),
        }
    }

    pub fn last(&self) -> IpAddr {
        match self {
            Self::V4(range) => IpAddr::V4(range.end_addr),
            Self::V6(range) => IpAddr::V6(range.end_addr),
        }
    }
}

/// Creates the range covering the whole network block of `ip/prefix`,
/// network and broadcast addresses included. Host bits in `ip` are ignored.
pub fn cidr_range(ip: IpAddr, prefix: u8) -> anyhow::Result<IpRange> {
    match ip {
        IpAddr::V4(ipv4_addr) => {
            let network = Ipv4Network::new(ipv4_addr, prefix)?;
            Ok(IpRange::V4(Ipv4Range::new(
                network.network(),
                network.broadcast(),
            )))
        }
        IpAddr::V6(ipv6_addr) => {
            let network = Ipv6Network::new(ipv6_addr, prefix)?;
            let mask: u128 = u128::from(network.mask());
            let start: u128 = u128::from(network.network());
            let end: u128 = start | !mask;
            Ok(IpRange::V6(Ipv6Range::new(
                Ipv6Addr::from(start),
                Ipv6Addr::from(end),
            )))
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
