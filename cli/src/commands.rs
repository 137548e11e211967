pub mod config;
pub mod filter;
pub mod resolve;
pub mod scope;
pub mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hostscope")]
#[command(about = "Resolve network expressions into hosts and ranges.", version)]
pub struct CommandLine {
    /// Config file parsed on top of the default config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve network expressions into contiguous address ranges
    #[command(alias = "r")]
    Resolve {
        /// Expressions such as 10.0.0.0/24, 192.168.1.1-20 or fe80::/120
        expressions: Vec<String>,
        /// Also list every single host
        #[arg(long)]
        hosts: bool,
    },
    /// Check whether network expressions can be resolved
    #[command(alias = "v")]
    Validate {
        #[arg(required = true)]
        expressions: Vec<String>,
    },
    /// Expand networks into the hosts to analyse
    #[command(alias = "s")]
    Scope {
        /// Network to include
        #[arg(short = 'n', long = "network")]
        networks: Vec<String>,
        /// File with one network per line, '+' to include, '-' to omit
        #[arg(short = 'L', long = "network-list")]
        network_list: Option<PathBuf>,
        /// Network to omit
        #[arg(short = 'x', long = "omit")]
        omit: Vec<String>,
    },
    /// Keep only the hosts of a file that lie inside a network
    #[command(alias = "f")]
    Filter {
        network: String,
        /// File with one host address per line
        file: PathBuf,
    },
    /// Print the merged configuration
    #[command(alias = "c")]
    Config,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
