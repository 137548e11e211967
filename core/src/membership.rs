//! Range membership filtering for host collections keyed by address strings.

use std::collections::HashMap;
use std::net::IpAddr;

use hostscope_common::network::address;
use tracing::debug;

use crate::resolver::{NetworkResolver, ResolutionError, ResolvedNetwork};

/// Whether the address literal `host` lies inside `network`.
///
/// `None` if `host` is not an address literal at all.
pub fn is_member(network: &ResolvedNetwork, host: &str) -> Option<bool> {
    address::parse_address(host)
        .ok()
        .map(|ip: IpAddr| network.contains(&ip))
}

/// Removes every host outside `expression` from `hosts` and returns how many were removed.
///
/// Keys that are not address literals are kept. The network is resolved
/// without host storage.
pub fn filter_to_network<V>(
    resolver: &NetworkResolver,
    hosts: &mut HashMap<String, V>,
    expression: &str,
) -> Result<usize, ResolutionError> {
    let network = resolver.resolve(expression, false)?;

    let outside: Vec<String> = hosts
        .keys()
        .filter(|host| is_member(&network, host) == Some(false))
        .cloned()
        .collect();

    for host in &outside {
        hosts.remove(host);
    }

    debug!(
        "removed {} host(s) outside of '{expression}'",
        outside.len()
    );
    Ok(outside.len())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
