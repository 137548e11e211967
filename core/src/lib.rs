//! # Hostscope Core
//!
//! Resolution of network expressions into hosts and ranges.
//!
//! * **[`enumerator`]**: the [`enumerator::AddressEnumerator`] abstraction and its nmap implementation.
//! * **[`resolver`]**: [`resolver::NetworkResolver`], which owns the per-expression cache.
//! * **[`membership`]**: filtering host collections down to a network.
//! * **[`scope`]**: expanding network lists into host sets.
//!
//! High-level code should construct one resolver per run and pass it by
//! reference; it is `Sync` and can be shared behind an `Arc`.

pub mod enumerator;
pub mod membership;
pub mod resolver;
pub mod scope;

pub use enumerator::{AddressEnumerator, EnumeratorError, NmapEnumerator};
pub use resolver::{NetworkResolver, ResolutionError, ResolvedNetwork};
