use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use hostscope_common::network::address::AddressFamily;
use hostscope_core::{AddressEnumerator, EnumeratorError, NetworkResolver};

/// In-memory enumerator with canned answers per (expression, family).
pub struct FakeEnumerator {
    answers: HashMap<(String, AddressFamily), Vec<IpAddr>>,
    calls: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl FakeEnumerator {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
            delay: None,
        }
    }

    pub fn with(mut self, expression: &str, family: AddressFamily, addresses: &[&str]) -> Self {
        let addresses = addresses.iter().map(|s| s.parse().unwrap()).collect();
        self.answers.insert((expression.to_string(), family), addresses);
        self
    }

    /// Canned IPv4 answer covering `first..=last` of `prefix.x`.
    pub fn with_v4_block(self, expression: &str, prefix: &str, first: u8, last: u8) -> Self {
        let addresses: Vec<String> = (first..=last).map(|o| format!("{prefix}.{o}")).collect();
        let refs: Vec<&str> = addresses.iter().map(String::as_str).collect();
        self.with(expression, AddressFamily::V4, &refs)
    }

    /// Makes every call block for `delay`, to widen race windows.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn into_resolver(self) -> (NetworkResolver, Arc<AtomicUsize>) {
        let calls = self.calls();
        (NetworkResolver::new(Box::new(self)), calls)
    }
}

impl AddressEnumerator for FakeEnumerator {
    fn enumerate(
        &self,
        expression: &str,
        family: AddressFamily,
    ) -> Result<Vec<IpAddr>, EnumeratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        Ok(self
            .answers
            .get(&(expression.to_string(), family))
            .cloned()
            .unwrap_or_default())
    }
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}
