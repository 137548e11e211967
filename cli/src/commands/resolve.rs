use std::sync::Arc;
use std::time::Instant;

use colored::*;
use hostscope_common::{config::Config, success};
use hostscope_core::{NetworkResolver, ResolutionError, ResolvedNetwork};
use tracing::error;

use crate::terminal::{format, print, spinner};

type Outcome = (String, Result<Arc<ResolvedNetwork>, ResolutionError>);

pub async fn resolve(
    resolver: Arc<NetworkResolver>,
    expressions: Vec<String>,
    list_hosts: bool,
    cfg: &Config,
) -> anyhow::Result<()> {
    let expressions: Vec<String> = if expressions.is_empty() {
        cfg.default_networks.clone()
    } else {
        expressions
    };
    if expressions.is_empty() {
        anyhow::bail!("no network expressions given and no 'networks' configured");
    }

    let store_hosts: bool = list_hosts || cfg.store_hosts;
    let start_time: Instant = Instant::now();
    spinner::start(format!("Resolving {} expression(s)...", expressions.len()));

    let mut handles = Vec::with_capacity(expressions.len());
    for expression in expressions {
        let resolver = Arc::clone(&resolver);
        handles.push(tokio::task::spawn_blocking(move || -> Outcome {
            let result = resolver.resolve(&expression, store_hosts);
            (expression, result)
        }));
    }

    let mut outcomes: Vec<Outcome> = Vec::with_capacity(handles.len());
    for handle in handles {
        outcomes.push(handle.await?);
    }
    spinner::stop();

    let mut failures: usize = 0;
    for (idx, (expression, result)) in outcomes.iter().enumerate() {
        match result {
            Ok(network) => print_network(idx, expression, network, list_hosts),
            Err(e) => {
                failures += 1;
                error!("{e}");
            }
        }
    }

    let resolved: usize = outcomes.len() - failures;
    print::fat_separator();
    let total_time: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64()).bold().yellow();
    print::centerln(&format!(
        "{} of {} expression(s) resolved in {}",
        resolved.to_string().bold().green(),
        outcomes.len(),
        total_time
    ));

    if failures > 0 {
        anyhow::bail!("{failures} expression(s) could not be resolved");
    }
    success!("all expressions resolved");
    Ok(())
}

fn print_network(idx: usize, expression: &str, network: &ResolvedNetwork, list_hosts: bool) {
    print::tree_head(idx, expression);

    let mut details: Vec<(String, ColoredString)> =
        network.ranges().iter().map(format::range_to_detail).collect();
    details.push((String::from("Total"), format::count_to_string(network.address_count())));

    if list_hosts {
        details.extend(network.hosts().iter().map(format::ip_to_detail));
    }

    print::as_tree_one_level(details);
}
