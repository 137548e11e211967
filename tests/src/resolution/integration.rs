use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use hostscope_common::network::address::AddressFamily;
use hostscope_common::network::range::AddressRange;
use hostscope_common::network::target::NetworkList;
use hostscope_core::membership::filter_to_network;
use hostscope_core::scope::{expand_scope, invalid_expressions};
use hostscope_core::{NetworkResolver, ResolutionError};

use crate::support::{FakeEnumerator, ip};

fn lab_resolver() -> (NetworkResolver, Arc<std::sync::atomic::AtomicUsize>) {
    FakeEnumerator::new()
        .with_v4_block("10.0.0.0/30", "10.0.0", 0, 3)
        .with_v4_block("10.0.0.0/24", "10.0.0", 0, 255)
        .with_v4_block("10.0.0.128/25", "10.0.0", 128, 255)
        .with(
            "scattered",
            AddressFamily::V4,
            &["10.0.0.9", "10.0.0.1", "10.0.0.2", "10.0.0.3", "10.0.0.7"],
        )
        .with("fe80::/126", AddressFamily::V6, &["fe80::", "fe80::1", "fe80::2", "fe80::3"])
        .into_resolver()
}

#[test]
fn ranges_are_minimal_and_flatten_back_to_hosts() {
    let (resolver, _) = lab_resolver();

    let resolved = resolver.resolve("scattered", true).unwrap();

    assert_eq!(
        resolved.ranges(),
        &[
            AddressRange::new(ip("10.0.0.1"), ip("10.0.0.3")),
            AddressRange::single(ip("10.0.0.7")),
            AddressRange::single(ip("10.0.0.9")),
        ]
    );

    let flattened: Vec<IpAddr> = resolved.ranges().iter().flat_map(|r| r.iter()).collect();
    assert_eq!(flattened, resolved.hosts());

    // No two neighbouring ranges could be merged.
    for pair in resolved.ranges().windows(2) {
        assert!(pair[0].high < pair[1].low);
        assert!(!hostscope_common::network::address::is_successor(
            &pair[0].high,
            &pair[1].low
        ));
    }
}

#[test]
fn repeated_resolution_is_served_from_the_cache() {
    let (resolver, calls) = lab_resolver();

    let first = resolver.resolve("10.0.0.0/30", true).unwrap();
    let second = resolver.resolve("10.0.0.0/30", true).unwrap();
    let ranges_only = resolver.resolve("10.0.0.0/30", false).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &ranges_only));
    assert_eq!(resolver.cache_len(), 1);
}

#[test]
fn host_storage_is_upgraded_but_never_dropped() {
    let (resolver, calls) = lab_resolver();

    let bare = resolver.resolve("10.0.0.0/30", false).unwrap();
    assert!(!bare.has_hosts());
    assert_eq!(bare.address_count(), 4);

    let full = resolver.resolve("10.0.0.0/30", true).unwrap();
    assert!(full.has_hosts());
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let again = resolver.resolve("10.0.0.0/30", false).unwrap();
    assert!(again.has_hosts());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn ipv6_is_tried_when_ipv4_yields_nothing() {
    let (resolver, calls) = lab_resolver();

    let hosts = resolver.hosts("fe80::/126").unwrap();

    assert_eq!(hosts.len(), 4);
    assert!(hosts.iter().all(IpAddr::is_ipv6));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn unresolvable_expressions_are_errors_and_not_cached() {
    let (resolver, calls) = lab_resolver();

    let err = resolver.resolve("no.such.network", true).unwrap_err();

    assert!(matches!(err, ResolutionError::Unresolvable { .. }));
    assert!(resolver.cached("no.such.network").is_none());
    assert!(!resolver.is_valid_expression("no.such.network"));
    // One V4 and one V6 attempt per resolution.
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_a_single_enumeration() {
    let (resolver, calls) = FakeEnumerator::new()
        .with_v4_block("10.0.0.0/24", "10.0.0", 0, 255)
        .with_delay(Duration::from_millis(50))
        .into_resolver();
    let resolver = Arc::new(resolver);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let resolver = Arc::clone(&resolver);
        handles.push(tokio::task::spawn_blocking(move || {
            resolver.resolve("10.0.0.0/24", true)
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap().unwrap());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
    assert_eq!(results[0].hosts().len(), 256);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_distinct_expressions_each_resolve_once() {
    let (resolver, calls) = lab_resolver();
    let resolver = Arc::new(resolver);
    let expressions = ["10.0.0.0/30", "10.0.0.0/24", "10.0.0.128/25"];

    let mut handles = Vec::new();
    for round in 0..3 {
        for expression in expressions {
            let resolver = Arc::clone(&resolver);
            handles.push(tokio::task::spawn_blocking(move || {
                resolver.resolve(expression, round % 2 == 0).map(|r| r.address_count())
            }));
        }
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(resolver.cache_len(), 3);
    // Each expression is enumerated once, plus at most one upgrade to hosts.
    assert!(calls.load(Ordering::SeqCst) <= 6);
    for expression in expressions {
        assert!(resolver.cached(expression).unwrap().has_hosts());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn distinct_expressions_resolve_in_parallel() {
    let (resolver, calls) = FakeEnumerator::new()
        .with_v4_block("a", "10.0.1", 0, 3)
        .with_v4_block("b", "10.0.2", 0, 3)
        .with_delay(Duration::from_millis(300))
        .into_resolver();
    let resolver = Arc::new(resolver);

    let started = Instant::now();
    let mut handles = Vec::new();
    for expression in ["a", "b"] {
        let resolver = Arc::clone(&resolver);
        handles.push(tokio::task::spawn_blocking(move || {
            resolver.resolve(expression, true)
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().hosts().len(), 4);
    }
    let elapsed = started.elapsed();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    // One after the other would take at least 600ms.
    assert!(elapsed < Duration::from_millis(550), "took {elapsed:?}");
}

#[test]
fn filtering_keeps_members_and_unparseable_keys() {
    let (resolver, _) = lab_resolver();

    let mut hosts: HashMap<String, &str> = HashMap::from([
        ("10.0.0.127".to_string(), "below"),
        ("10.0.0.128".to_string(), "first"),
        ("10.0.0.255".to_string(), "last"),
        ("10.0.1.0".to_string(), "above"),
        ("fe80::1".to_string(), "other family"),
        ("printer.lan".to_string(), "name"),
    ]);

    let removed = filter_to_network(&resolver, &mut hosts, "10.0.0.128/25").unwrap();

    assert_eq!(removed, 3);
    let mut kept: Vec<&str> = hosts.keys().map(String::as_str).collect();
    kept.sort();
    assert_eq!(kept, ["10.0.0.128", "10.0.0.255", "printer.lan"]);
    assert!(!resolver.cached("10.0.0.128/25").unwrap().has_hosts());
}

#[test]
fn filtering_against_an_unresolvable_network_leaves_the_map_alone() {
    let (resolver, _) = lab_resolver();
    let mut hosts: HashMap<String, ()> = HashMap::from([("10.0.0.1".to_string(), ())]);

    let result = filter_to_network(&resolver, &mut hosts, "nowhere");

    assert!(result.is_err());
    assert_eq!(hosts.len(), 1);
}

#[test]
fn scope_unions_includes_and_subtracts_omits() {
    let (resolver, _) = lab_resolver();
    let list = NetworkList::parse("10.0.0.0/30\n+ fe80::/126\n- 10.0.0.0/30\n+ scattered\n");

    let scope = expand_scope(&resolver, &list).unwrap();

    let expected: Vec<IpAddr> = ["10.0.0.7", "10.0.0.9", "fe80::", "fe80::1", "fe80::2", "fe80::3"]
        .into_iter()
        .map(ip)
        .collect();
    assert_eq!(scope, expected);
}

#[test]
fn scope_reports_invalid_expressions_in_list_order() {
    let (resolver, _) = lab_resolver();
    let list = NetworkList::parse("bogus-a\n10.0.0.0/30\n-bogus-b\n");

    assert_eq!(invalid_expressions(&resolver, &list), ["bogus-a", "bogus-b"]);
    assert!(expand_scope(&resolver, &list).is_err());
}
