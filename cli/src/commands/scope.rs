use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use hostscope_common::network::target::{NetworkList, Target};
use hostscope_common::{config::Config, success};
use hostscope_core::{NetworkResolver, scope as host_scope};

use crate::terminal::{format, print, spinner};

pub async fn scope(
    resolver: Arc<NetworkResolver>,
    networks: Vec<String>,
    network_list: Option<PathBuf>,
    omit: Vec<String>,
    cfg: &Config,
) -> anyhow::Result<()> {
    let list: NetworkList = build_list(networks, network_list, omit, cfg)?;
    if list.include.is_empty() {
        anyhow::bail!("no networks to include, use -n, -L or the 'networks' setting");
    }

    spinner::start(format!("Expanding {} network(s)...", list.include.len()));
    let result = tokio::task::spawn_blocking(move || -> anyhow::Result<Vec<IpAddr>> {
        let invalid = host_scope::invalid_expressions(&resolver, &list);
        if !invalid.is_empty() {
            anyhow::bail!("invalid network expression(s): {}", invalid.join(", "));
        }
        Ok(host_scope::expand_scope(&resolver, &list)?)
    })
    .await?;
    spinner::stop();

    let hosts = result?;
    if hosts.is_empty() {
        print::no_results();
        return Ok(());
    }

    print::as_tree_one_level(hosts.iter().map(format::ip_to_detail).collect());
    success!("{} host(s) in scope", format::count_to_string(hosts.len() as u128));
    Ok(())
}

fn build_list(
    networks: Vec<String>,
    network_list: Option<PathBuf>,
    omit: Vec<String>,
    cfg: &Config,
) -> anyhow::Result<NetworkList> {
    let mut list = NetworkList::new();

    if let Some(path) = network_list {
        let from_file = NetworkList::load(&path)
            .with_context(|| format!("network list {} could not be read", path.display()))?;
        list.extend(from_file);
    }

    for network in networks {
        list.push(Target::Include(network));
    }
    for network in omit {
        list.push(Target::Omit(network));
    }

    if list.include.is_empty() {
        for network in &cfg.default_networks {
            list.push(Target::Include(network.clone()));
        }
    }

    Ok(list)
}
