use std::path::Path;

use anyhow::Context;
use hostscope_common::config::{ConfigDocument, DEFAULT_CONFIG_FILE};
use tracing::{debug, warn};

/// Parses the default config, then the user config on top of it.
///
/// A broken default config only produces a warning; a broken user config is an error.
pub fn load_document(user_config: Option<&Path>) -> anyhow::Result<ConfigDocument> {
    let mut document = ConfigDocument::new();

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        match ConfigDocument::load(default_path, &document) {
            Ok(parsed) => document = parsed,
            Err(e) => warn!("Could not parse default config, proceeding without it: {e}"),
        }
    } else if user_config.is_none() {
        debug!("no default config at {}", default_path.display());
    }

    if let Some(path) = user_config {
        document = ConfigDocument::load(path, &document)
            .with_context(|| format!("could not load config {}", path.display()))?;
    }

    Ok(document)
}
