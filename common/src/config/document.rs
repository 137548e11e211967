//! # Config Document
//!
//! Two-level mapping (section -> key -> value) built from lexer tokens and
//! merged over a base document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::ConfigError;
use crate::config::lexer::{Lexer, Token};

/// Section that receives statements appearing before any header.
pub const DEFAULT_SECTION: &str = "core";

pub type Section = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: BTreeMap<String, Section>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from `tokens` on top of a copy of `base`.
    ///
    /// Later statements overwrite earlier values for the same section and key,
    /// including values from `base`. Headers create their section if needed
    /// and never clear it. Stops at the first statement without `=`.
    pub fn build<I>(tokens: I, base: &ConfigDocument) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (usize, Token)>,
    {
        let mut document = base.clone();
        let mut current = DEFAULT_SECTION.to_string();
        document.ensure_section(&current);

        for (line, token) in tokens {
            match token {
                Token::SectionHeader(name) => {
                    document.ensure_section(&name);
                    current = name;
                }
                Token::Statement(statement) => {
                    let Some((key, value)) = split_statement(&statement) else {
                        return Err(ConfigError::Syntax { line, statement });
                    };
                    document.set(&current, key, value);
                }
            }
        }

        Ok(document)
    }

    /// Parses `text` on top of `base`. A leading byte order mark is ignored.
    pub fn parse_str(text: &str, base: &ConfigDocument) -> Result<Self, ConfigError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self::build(Lexer::new(text), base)
    }

    pub fn load<P: AsRef<Path>>(path: P, base: &ConfigDocument) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("parsing config file {}", path.display());
        Self::parse_str(&text, base)
    }

    pub fn ensure_section(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        self.ensure_section(section).insert(key.into(), value.into());
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    /// Reads a value as one comma-separated record with each field trimmed.
    ///
    /// Fields may be quoted to carry commas, e.g. `ports = 22, "80,443"`.
    pub fn get_list(&self, section: &str, key: &str) -> Result<Option<Vec<String>>, ConfigError> {
        let Some(value) = self.get(section, key) else {
            return Ok(None);
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(value.as_bytes());

        let list_error = |source| ConfigError::List {
            section: section.to_string(),
            key: key.to_string(),
            source,
        };

        match reader.records().next() {
            Some(record) => {
                let record = record.map_err(list_error)?;
                Ok(Some(record.iter().map(str::to_string).collect()))
            }
            None => Ok(Some(Vec::new())),
        }
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, entries)| (name.as_str(), entries))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Splits a statement at its first `=` into a normalized key and value.
///
/// All quote characters are deleted from the key. The value loses one pair of
/// wrapping quotes, but only when that quote character occurs exactly twice.
pub fn split_statement(statement: &str) -> Option<(String, String)> {
    let (key, value) = statement.split_once('=')?;

    let key: String = key.chars().filter(|c| !matches!(c, '"' | '\'')).collect();
    let key = key.trim().to_string();
    let value = strip_wrapping_quotes(value.trim()).to_string();

    Some((key, value))
}

fn strip_wrapping_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && value.starts_with(quote)
            && value.ends_with(quote)
            && value.matches(quote).count() == 2
        {
            return &value[1..value.len() - 1];
        }
    }
    value
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
