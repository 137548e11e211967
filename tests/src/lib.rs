//! Cross-crate tests. Nothing in here needs nmap: resolution runs against
//! [`support::FakeEnumerator`].

#[cfg(test)]
mod support;

#[cfg(test)]
mod resolution {
    mod integration;
}

#[cfg(test)]
mod config {
    mod integration;
}
