use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use hostscope_common::success;
use hostscope_core::{NetworkResolver, membership};

use crate::terminal::{print, spinner};

pub async fn filter(resolver: Arc<NetworkResolver>, network: String, file: &Path) -> anyhow::Result<()> {
    let text: String = fs::read_to_string(file)
        .with_context(|| format!("host file {} could not be read", file.display()))?;

    // host -> position in the file, so the output keeps the input order
    let mut hosts: HashMap<String, usize> = HashMap::new();
    for (idx, line) in text.lines().enumerate() {
        let host = line.trim();
        if !host.is_empty() {
            hosts.entry(host.to_string()).or_insert(idx);
        }
    }
    let total: usize = hosts.len();

    spinner::start(format!("Resolving {network}..."));
    let (hosts, removed) = tokio::task::spawn_blocking(move || {
        let removed = membership::filter_to_network(&resolver, &mut hosts, &network);
        (hosts, removed)
    })
    .await?;
    spinner::stop();
    let removed: usize = removed?;

    let mut kept: Vec<(String, usize)> = hosts.into_iter().collect();
    kept.sort_by_key(|(_, idx)| *idx);
    for (host, _) in &kept {
        print::print(host);
    }

    success!("kept {} of {total} host(s), removed {removed}", kept.len());
    Ok(())
}
