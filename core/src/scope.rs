//! # Scan Scope
//!
//! Expands a [`NetworkList`] into the concrete hosts it covers.
//!
//! Every include expression contributes its hosts, every omit expression
//! takes its hosts away again. The result is sorted and free of duplicates.

use std::collections::BTreeSet;
use std::net::IpAddr;

use hostscope_common::network::target::NetworkList;
use tracing::debug;

use crate::resolver::{NetworkResolver, ResolutionError};

pub fn expand_scope(
    resolver: &NetworkResolver,
    list: &NetworkList,
) -> Result<Vec<IpAddr>, ResolutionError> {
    // IpAddr orders every IPv4 address before every IPv6 one.
    let mut hosts: BTreeSet<IpAddr> = BTreeSet::new();

    for expression in &list.include {
        hosts.extend(resolver.hosts(expression)?);
    }

    for expression in &list.omit {
        for ip in resolver.hosts(expression)? {
            hosts.remove(&ip);
        }
    }

    debug!("scope covers {} host(s)", hosts.len());
    Ok(hosts.into_iter().collect())
}

/// Expressions of `list` that do not resolve, includes first.
pub fn invalid_expressions(resolver: &NetworkResolver, list: &NetworkList) -> Vec<String> {
    list.expressions()
        .filter(|expression| !resolver.is_valid_expression(expression))
        .map(str::to_string)
        .collect()
}
