//! # Network Expression Resolver
//!
//! Turns network expressions (CIDR, wildcard, hyphen range or single address)
//! into their host list and minimal range list, and memoizes the result per
//! expression string for the lifetime of the resolver.
//!
//! Expressions are enumerated as IPv4 first; only if that yields nothing is
//! the same expression retried as IPv6. The cache key is the expression
//! exactly as given, so `10.0.0.0/24` and `10.0.0.0/24 ` are separate entries.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hostscope_common::network::address::AddressFamily;
use hostscope_common::network::range::{self, AddressRange};
use thiserror::Error;
use tracing::{debug, warn};

use crate::enumerator::{AddressEnumerator, EnumeratorError};

/// Result of resolving one expression.
///
/// `ranges` is sorted, non-overlapping and maximal. `hosts` is only filled
/// when host storage was requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedNetwork {
    hosts: Vec<IpAddr>,
    ranges: Vec<AddressRange>,
}

impl ResolvedNetwork {
    /// Builds the network from enumerated addresses, in any order.
    pub fn from_addresses(mut addresses: Vec<IpAddr>, store_hosts: bool) -> Self {
        addresses.sort_unstable();
        addresses.dedup();
        let ranges = range::coalesce(&addresses);
        let hosts = if store_hosts { addresses } else { Vec::new() };
        Self { hosts, ranges }
    }

    pub fn hosts(&self) -> &[IpAddr] {
        &self.hosts
    }

    pub fn ranges(&self) -> &[AddressRange] {
        &self.ranges
    }

    pub fn has_hosts(&self) -> bool {
        !self.hosts.is_empty()
    }

    /// Whether `ip` lies inside one of the ranges, bounds included.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        range::find_range(&self.ranges, ip).is_some()
    }

    /// Number of addresses covered by the ranges.
    pub fn address_count(&self) -> u128 {
        self.ranges
            .iter()
            .fold(0u128, |total, range| total.saturating_add(range.len()))
    }
}

#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Neither the IPv4 nor the IPv6 reading of the expression produced addresses.
    #[error("'{expression}' is not a valid network expression")]
    Unresolvable { expression: String },

    /// The enumerator failed, so emptiness could not be established.
    #[error("could not enumerate '{expression}': {source}")]
    Enumerator {
        expression: String,
        #[source]
        source: EnumeratorError,
    },
}

/// Cache entry for one expression. `None` until a resolution succeeds.
type Slot = Arc<Mutex<Option<Arc<ResolvedNetwork>>>>;

/// Resolves network expressions through an [`AddressEnumerator`] and owns the cache.
///
/// Every expression has its own slot lock, held across the check, enumerate
/// and store sequence. An expression is enumerated at most once even under
/// concurrent callers, while distinct expressions resolve in parallel. The map
/// lock is only taken to look up or insert a slot.
pub struct NetworkResolver {
    enumerator: Box<dyn AddressEnumerator>,
    cache: Mutex<HashMap<String, Slot>>,
}

impl NetworkResolver {
    pub fn new(enumerator: Box<dyn AddressEnumerator>) -> Self {
        Self {
            enumerator,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves `expression`, serving from the cache where possible.
    ///
    /// A cached entry is reused unless hosts are requested and the entry was
    /// stored without them. Entries only ever gain hosts, never lose them.
    pub fn resolve(
        &self,
        expression: &str,
        store_hosts: bool,
    ) -> Result<Arc<ResolvedNetwork>, ResolutionError> {
        let slot = self.slot(expression);
        let mut entry = lock_slot(&slot);

        if let Some(cached) = entry.as_ref()
            && (!store_hosts || cached.has_hosts())
        {
            return Ok(Arc::clone(cached));
        }

        let addresses = self.enumerate(expression)?;
        let resolved = Arc::new(ResolvedNetwork::from_addresses(addresses, store_hosts));
        debug!(
            "resolved '{expression}' into {} range(s)",
            resolved.ranges().len()
        );

        *entry = Some(Arc::clone(&resolved));
        Ok(resolved)
    }

    /// Contiguous ranges of `expression`, without storing its hosts.
    pub fn ranges(&self, expression: &str) -> Result<Vec<AddressRange>, ResolutionError> {
        Ok(self.resolve(expression, false)?.ranges().to_vec())
    }

    /// Every host of `expression`, in ascending order.
    pub fn hosts(&self, expression: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        Ok(self.resolve(expression, true)?.hosts().to_vec())
    }

    pub fn is_valid_expression(&self, expression: &str) -> bool {
        match self.resolve(expression, true) {
            Ok(_) => true,
            Err(e) => {
                debug!("{e}");
                false
            }
        }
    }

    /// Waits for an in-flight resolution of `expression`, if any.
    pub fn cached(&self, expression: &str) -> Option<Arc<ResolvedNetwork>> {
        let slot = self.lock_cache().get(expression).cloned()?;
        let entry = lock_slot(&slot);
        entry.clone()
    }

    /// Number of successfully resolved expressions.
    pub fn cache_len(&self) -> usize {
        let slots: Vec<Slot> = self.lock_cache().values().cloned().collect();
        slots.iter().filter(|slot| lock_slot(slot).is_some()).count()
    }

    /// IPv4 first, IPv6 if that produced nothing.
    fn enumerate(&self, expression: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        let mut failure: Option<EnumeratorError> = None;

        for family in [AddressFamily::V4, AddressFamily::V6] {
            match self.enumerator.enumerate(expression, family) {
                Ok(addresses) if !addresses.is_empty() => return Ok(addresses),
                Ok(_) => debug!("no {family} addresses for '{expression}'"),
                Err(e) => {
                    warn!("{family} enumeration of '{expression}' failed: {e}");
                    failure = Some(e);
                }
            }
        }

        Err(match failure {
            Some(source) => ResolutionError::Enumerator {
                expression: expression.to_string(),
                source,
            },
            None => ResolutionError::Unresolvable {
                expression: expression.to_string(),
            },
        })
    }

    /// The slot of `expression`, created empty on first use.
    fn slot(&self, expression: &str) -> Slot {
        let mut cache = self.lock_cache();
        match cache.get(expression) {
            Some(slot) => Arc::clone(slot),
            None => {
                let slot = Slot::default();
                cache.insert(expression.to_string(), Arc::clone(&slot));
                slot
            }
        }
    }

    // Slots are inserted whole and never removed, so a poisoned map is still consistent.
    fn lock_cache(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// An entry is replaced whole or not at all, so a poisoned slot is still consistent.
fn lock_slot(slot: &Slot) -> MutexGuard<'_, Option<Arc<ResolvedNetwork>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
