//! # Configuration
//!
//! The configuration dialect ([`lexer`], [`document`]) and the typed runtime
//! settings ([`Config`]) the tools read from its `core` section.

pub mod document;
pub mod lexer;

use std::path::PathBuf;

use thiserror::Error;

pub use document::{ConfigDocument, DEFAULT_SECTION};
pub use lexer::{LexState, Token};

/// File looked up in the working directory before any user config.
pub const DEFAULT_CONFIG_FILE: &str = "hostscope.conf";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: statement '{statement}' has no '=' separator")]
    Syntax { line: usize, statement: String },

    #[error("{section}.{key} is not a valid comma separated list: {source}")]
    List {
        section: String,
        key: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid value '{value}' for setting '{key}': {reason}")]
    Setting {
        key: String,
        value: String,
        reason: String,
    },
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Program used to enumerate network expressions.
    pub nmap_path: PathBuf,
    /// Where scratch report files go. `None` means the system temp directory.
    pub scratch_dir: Option<PathBuf>,
    /// Keep individual hosts when resolving, not only ranges.
    pub store_hosts: bool,
    /// Networks used when the command line names none.
    pub default_networks: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nmap_path: PathBuf::from("nmap"),
            scratch_dir: None,
            store_hosts: true,
            default_networks: Vec::new(),
        }
    }
}

impl Config {
    /// Reads the settings from the `core` section, keeping defaults for absent keys.
    pub fn from_document(document: &ConfigDocument) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = non_empty(document.get(DEFAULT_SECTION, "nmap_path")) {
            config.nmap_path = PathBuf::from(path);
        }
        if let Some(dir) = non_empty(document.get(DEFAULT_SECTION, "scratch_dir")) {
            config.scratch_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = document.get(DEFAULT_SECTION, "store_hosts") {
            config.store_hosts = parse_bool("store_hosts", value)?;
        }
        if let Some(networks) = document.get_list(DEFAULT_SECTION, "networks")? {
            config.default_networks = networks.into_iter().filter(|n| !n.is_empty()).collect();
        }

        Ok(config)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::Setting {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected a boolean".to_string(),
        }),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
