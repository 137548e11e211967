use std::sync::Arc;

use hostscope_common::success;
use hostscope_core::NetworkResolver;

use crate::terminal::{format, print, spinner};

pub async fn validate(resolver: Arc<NetworkResolver>, expressions: Vec<String>) -> anyhow::Result<()> {
    spinner::start(format!("Validating {} expression(s)...", expressions.len()));
    let verdicts: Vec<(String, bool)> = tokio::task::spawn_blocking(move || {
        expressions
            .into_iter()
            .map(|expression| {
                let valid = resolver.is_valid_expression(&expression);
                (expression, valid)
            })
            .collect::<Vec<(String, bool)>>()
    })
    .await?;
    spinner::stop();

    for (expression, valid) in &verdicts {
        print::print_status(format!("{expression}: {}", format::validity(*valid)));
    }

    let invalid: usize = verdicts.iter().filter(|(_, valid)| !valid).count();
    if invalid > 0 {
        anyhow::bail!("{invalid} of {} expression(s) are invalid", verdicts.len());
    }
    success!("all {} expression(s) are valid", verdicts.len());
    Ok(())
}
