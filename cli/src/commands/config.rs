use colored::*;
use hostscope_common::config::{Config, ConfigDocument};

use crate::terminal::{colors, print};

pub fn show(document: &ConfigDocument, cfg: &Config) {
    for (idx, (name, entries)) in document.sections().enumerate() {
        print::tree_head(idx, name);
        let details: Vec<(String, ColoredString)> = entries
            .iter()
            .map(|(key, value)| (key.clone(), value.color(colors::TEXT_DEFAULT)))
            .collect();
        print::as_tree_one_level(details);
    }

    print::fat_separator();
    print::print_status(format!("nmap: {}", cfg.nmap_path.display()));
    let scratch: String = match &cfg.scratch_dir {
        Some(dir) => dir.display().to_string(),
        None => String::from("system temp directory"),
    };
    print::print_status(format!("scratch reports: {scratch}"));
    print::print_status(format!("store hosts: {}", cfg.store_hosts));
}
