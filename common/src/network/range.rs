//! # Address Range Model
//!
//! Inclusive runs of consecutive addresses within one family, and the helpers
//! that build and search them.

use std::fmt;
use std::net::IpAddr;

use crate::network::address::{self, AddressFamily};

/// A continuous, inclusive range of addresses. Both bounds belong to the same family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressRange {
    pub low: IpAddr,
    pub high: IpAddr,
}

impl AddressRange {
    pub fn new(low: IpAddr, high: IpAddr) -> Self {
        Self { low, high }
    }

    pub fn single(ip: IpAddr) -> Self {
        Self::new(ip, ip)
    }

    pub fn family(&self) -> AddressFamily {
        AddressFamily::of(&self.low)
    }

    /// Inclusive on both bounds. Addresses of the other family are never members.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        if AddressFamily::of(ip) != self.family() {
            return false;
        }
        let value = address::ordinal(ip);
        address::ordinal(&self.low) <= value && value <= address::ordinal(&self.high)
    }

    /// Number of addresses in the range, saturating at `u128::MAX`.
    pub fn len(&self) -> u128 {
        let low = address::ordinal(&self.low);
        let high = address::ordinal(&self.high);
        if high < low {
            return 0;
        }
        (high - low).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = IpAddr> + Clone {
        let family = self.family();
        let start: u128 = address::ordinal(&self.low);
        let end: u128 = address::ordinal(&self.high);
        (start..=end).filter_map(move |value| address::from_ordinal(family, value))
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "{}", self.low)
        } else {
            write!(f, "{}-{}", self.low, self.high)
        }
    }
}

/// Folds an ascending address list into maximal ranges in a single pass.
///
/// A new range starts whenever an address is not the direct successor of the
/// previous one, which also splits on a change of family.
pub fn coalesce(addresses: &[IpAddr]) -> Vec<AddressRange> {
    let mut ranges: Vec<AddressRange> = Vec::new();
    for ip in addresses {
        match ranges.last_mut() {
            Some(current) if address::is_successor(&current.high, ip) => current.high = *ip,
            _ => ranges.push(AddressRange::single(*ip)),
        }
    }
    ranges
}

/// Finds the range holding `ip`.
///
/// `ranges` must be sorted by [`address::sort_key`] of their lower bound and
/// must not overlap, which is what [`coalesce`] produces for ascending input.
pub fn find_range<'a>(ranges: &'a [AddressRange], ip: &IpAddr) -> Option<&'a AddressRange> {
    let key = address::sort_key(ip);
    let idx = ranges.partition_point(|range| address::sort_key(&range.low) <= key);
    idx.checked_sub(1)
        .map(|candidate| &ranges[candidate])
        .filter(|range| range.contains(ip))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
