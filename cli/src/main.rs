mod commands;
mod settings;
mod terminal;

use std::sync::Arc;

use anyhow::Context;
use commands::{CommandLine, Commands, config, filter, resolve, scope, validate};
use hostscope_common::config::Config;
use hostscope_core::{NetworkResolver, NmapEnumerator};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let document = settings::load_document(commands.config.as_deref())?;
    let cfg: Config = Config::from_document(&document).context("invalid settings in config")?;

    let enumerator = NmapEnumerator::from_config(&cfg);
    let resolver: Arc<NetworkResolver> = Arc::new(NetworkResolver::new(Box::new(enumerator)));

    let result = match commands.command {
        Commands::Resolve { expressions, hosts } => {
            print::header("resolving networks");
            resolve::resolve(resolver, expressions, hosts, &cfg).await
        }
        Commands::Validate { expressions } => {
            print::header("validating networks");
            validate::validate(resolver, expressions).await
        }
        Commands::Scope {
            networks,
            network_list,
            omit,
        } => {
            print::header("expanding scope");
            scope::scope(resolver, networks, network_list, omit, &cfg).await
        }
        Commands::Filter { network, file } => {
            print::header("filtering hosts");
            filter::filter(resolver, network, &file).await
        }
        Commands::Config => {
            print::header("configuration");
            config::show(&document, &cfg);
            Ok(())
        }
    };

    print::end_of_program();
    result
}
