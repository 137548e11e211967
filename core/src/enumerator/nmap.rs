//! Address enumeration through nmap's list scan (`-sL`).
//!
//! nmap is asked to list the targets of an expression without resolving or
//! probing them, writing its XML report into a scratch file that is parsed
//! afterwards. No packets are sent.

use std::ffi::OsString;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use hostscope_common::config::Config;
use hostscope_common::network::address::{self, AddressFamily};
use roxmltree::Document;
use tempfile::NamedTempFile;
use tracing::debug;

use super::{AddressEnumerator, EnumeratorError};

const REPORT_ROOT: &str = "nmaprun";

pub struct NmapEnumerator {
    program: PathBuf,
    scratch_dir: Option<PathBuf>,
}

impl Default for NmapEnumerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NmapEnumerator {
    pub fn new() -> Self {
        Self::with_program("nmap")
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            scratch_dir: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let enumerator = Self::with_program(&config.nmap_path);
        match &config.scratch_dir {
            Some(dir) => enumerator.with_scratch_dir(dir),
            None => enumerator,
        }
    }

    /// Creates report files in `dir` instead of the system temp directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    fn tool_name(&self) -> String {
        self.program.display().to_string()
    }

    fn scratch_report(&self) -> std::io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("hostscope-").suffix(".xml");
        match &self.scratch_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }
}

impl AddressEnumerator for NmapEnumerator {
    fn enumerate(
        &self,
        expression: &str,
        family: AddressFamily,
    ) -> Result<Vec<IpAddr>, EnumeratorError> {
        // nmap would take it as an option, e.g. `-oN<file>` overwrites that file.
        if expression.starts_with('-') {
            debug!("refusing '{expression}', it starts like a {} option", self.tool_name());
            return Ok(Vec::new());
        }

        let report = self.scratch_report().map_err(EnumeratorError::Scratch)?;
        let args = build_args(report.path(), expression, family);
        debug!("running {} {:?}", self.tool_name(), args);

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| EnumeratorError::Spawn {
                tool: self.tool_name(),
                source,
            })?;

        // A missing or unreadable report is judged together with the exit status below.
        let xml = fs::read_to_string(report.path()).unwrap_or_default();

        match parse_report(&xml) {
            Ok(addresses) => {
                debug!(
                    "{} listed {} {family} address(es) for '{expression}'",
                    self.tool_name(),
                    addresses.len()
                );
                Ok(addresses)
            }
            Err(reason) if !status.success() => {
                debug!(
                    "{} rejected '{expression}' as {family} ({status}): {reason}",
                    self.tool_name()
                );
                Ok(Vec::new())
            }
            Err(reason) => Err(EnumeratorError::Report {
                tool: self.tool_name(),
                reason,
            }),
        }
    }
}

/// Arguments for a list scan writing XML to `report`.
fn build_args(report: &Path, expression: &str, family: AddressFamily) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-n".into(),  // no DNS resolution
        "-sL".into(), // list targets only
        "-oX".into(),
        report.as_os_str().to_os_string(),
        expression.into(),
    ];
    if family == AddressFamily::V6 {
        args.push("-6".into());
    }
    args
}

/// Extracts host addresses from an nmap XML report, in document order.
fn parse_report(xml: &str) -> Result<Vec<IpAddr>, String> {
    // roxmltree rejects DTDs, nmap always writes one.
    let cleaned: String = xml
        .lines()
        .filter(|line| !line.trim_start().starts_with("<!DOCTYPE"))
        .collect::<Vec<_>>()
        .join("\n");

    let doc = Document::parse(&cleaned).map_err(|e| format!("invalid XML: {e}"))?;

    let root = doc.root_element();
    if root.tag_name().name() != REPORT_ROOT {
        return Err(format!(
            "unexpected root element <{}>",
            root.tag_name().name()
        ));
    }

    let mut addresses = Vec::new();
    for host in root.children().filter(|node| node.has_tag_name("host")) {
        let Some(address_elem) = host
            .children()
            .filter(|node| node.has_tag_name("address"))
            .find(|node| node.attribute("addrtype") != Some("mac"))
        else {
            continue;
        };

        let addr = address_elem
            .attribute("addr")
            .ok_or_else(|| "address element without 'addr' attribute".to_string())?;
        let ip = address::parse_address(addr).map_err(|e| e.to_string())?;
        addresses.push(ip);
    }

    Ok(addresses)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
