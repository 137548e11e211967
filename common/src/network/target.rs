//! # Network List Model
//!
//! A network list names the expressions that make up a scan scope.
//!
//! Each non-blank line holds one network expression:
//! * `+10.0.0.0/24` includes the expression (the `+` is optional).
//! * `-10.0.0.5` omits the expression from whatever the includes produce.
//!
//! Expressions are kept verbatim; resolving them is the job of the core crate.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

/// One entry of a network list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Hosts of this expression belong to the scope.
    Include(String),
    /// Hosts of this expression are removed from the scope.
    Omit(String),
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();

        let target = if let Some(rest) = line.strip_prefix('+') {
            Target::Include(rest.trim().to_string())
        } else if let Some(rest) = line.strip_prefix('-') {
            Target::Omit(rest.trim().to_string())
        } else {
            Target::Include(line.to_string())
        };

        let (Target::Include(expr) | Target::Omit(expr)) = &target;
        if expr.is_empty() {
            return Err(format!("empty network expression: '{s}'"));
        }
        Ok(target)
    }
}

/// Expressions to include into and omit from a scope, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetworkList {
    pub include: Vec<String>,
    pub omit: Vec<String>,
}

impl NetworkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses list text. Blank lines and lone markers are skipped.
    pub fn parse(text: &str) -> Self {
        let mut list = NetworkList::new();
        for line in text.lines() {
            match line.parse::<Target>() {
                Ok(target) => list.push(target),
                Err(reason) => {
                    if !line.trim().is_empty() {
                        debug!("skipping network list line: {reason}");
                    }
                }
            }
        }
        list
    }

    pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        debug!("read network list from {}", path.as_ref().display());
        Ok(Self::parse(&text))
    }

    pub fn push(&mut self, target: Target) {
        match target {
            Target::Include(expr) => self.include.push(expr),
            Target::Omit(expr) => self.omit.push(expr),
        }
    }

    /// Appends the entries of `other` after the entries already present.
    pub fn extend(&mut self, other: NetworkList) {
        self.include.extend(other.include);
        self.omit.extend(other.omit);
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.omit.is_empty()
    }

    /// Every expression of the list, includes first.
    pub fn expressions(&self) -> impl Iterator<Item = &str> {
        self.include
            .iter()
            .chain(self.omit.iter())
            .map(String::as_str)
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
