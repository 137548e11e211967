//! The **abstraction** over tools that expand a network expression into addresses.
//!
//! The resolver only ever talks to an [`AddressEnumerator`]. The production
//! implementation shells out to nmap ([`NmapEnumerator`]); tests substitute
//! an in-memory enumerator returning canned address lists.

use std::net::IpAddr;

use hostscope_common::network::address::AddressFamily;
use thiserror::Error;

mod nmap;

pub use nmap::NmapEnumerator;

/// Expands a network expression into concrete addresses.
pub trait AddressEnumerator: Send + Sync {
    /// Lists the addresses `expression` denotes when read as `family`,
    /// in ascending order.
    ///
    /// An empty list means the tool ran but did not accept the expression
    /// for this family. Errors are reserved for failures of the tool itself.
    fn enumerate(&self, expression: &str, family: AddressFamily)
    -> Result<Vec<IpAddr>, EnumeratorError>;
}

#[derive(Debug, Error)]
pub enum EnumeratorError {
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not prepare scratch report: {0}")]
    Scratch(#[source] std::io::Error),

    #[error("{tool} produced an unusable report: {reason}")]
    Report { tool: String, reason: String },
}
