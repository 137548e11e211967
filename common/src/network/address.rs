//! # Address Classification
//!
//! Validation of IPv4/IPv6 literals and conversion between an address and its
//! ordinal, the unsigned integer used for ordering and contiguity checks.
//!
//! Ordinals of both families share the `u128` domain, so an ordinal on its own
//! does not identify an address. Always compare the [`AddressFamily`] first.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use thiserror::Error;

/// The IP family an address or an enumeration request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn of(ip: &IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// A string that is neither an IPv4 nor an IPv6 literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid IP address")]
pub struct AddressParseError {
    pub input: String,
}

pub fn is_ipv4(s: &str) -> bool {
    s.parse::<Ipv4Addr>().is_ok()
}

pub fn is_ipv6(s: &str) -> bool {
    s.parse::<Ipv6Addr>().is_ok()
}

/// Parses an IPv4 or IPv6 literal. Surrounding whitespace is not accepted.
pub fn parse_address(s: &str) -> Result<IpAddr, AddressParseError> {
    s.parse::<IpAddr>().map_err(|_| AddressParseError {
        input: s.to_string(),
    })
}

pub fn ordinal(ip: &IpAddr) -> u128 {
    match ip {
        IpAddr::V4(v4) => u128::from(u32::from(*v4)),
        IpAddr::V6(v6) => u128::from(*v6),
    }
}

/// Parses `s` and returns its ordinal.
pub fn str_to_ordinal(s: &str) -> Result<u128, AddressParseError> {
    parse_address(s).map(|ip| ordinal(&ip))
}

/// Inverse of [`ordinal`]. `None` if the value does not fit the family.
pub fn from_ordinal(family: AddressFamily, value: u128) -> Option<IpAddr> {
    match family {
        AddressFamily::V4 => u32::try_from(value)
            .ok()
            .map(|v| IpAddr::V4(Ipv4Addr::from(v))),
        AddressFamily::V6 => Some(IpAddr::V6(Ipv6Addr::from(value))),
    }
}

/// Sort key that keeps the two families apart: every IPv4 address orders
/// before every IPv6 address.
pub fn sort_key(ip: &IpAddr) -> (AddressFamily, u128) {
    (AddressFamily::of(ip), ordinal(ip))
}

/// True if `next` is the address directly after `prev` in the same family.
pub fn is_successor(prev: &IpAddr, next: &IpAddr) -> bool {
    AddressFamily::of(prev) == AddressFamily::of(next)
        && ordinal(prev).checked_add(1) == Some(ordinal(next))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
