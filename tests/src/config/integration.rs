use std::io::Write;
use std::path::PathBuf;

use hostscope_common::config::{Config, ConfigDocument, ConfigError, DEFAULT_SECTION};
use tempfile::NamedTempFile;

fn config_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn file_with_comments_sections_and_quotes_loads() {
    let file = config_file(
        "/* lab setup\n\
         still commented */\n\
         nmap_path = /opt/nmap/bin/nmap // local build\n\
         [scan]\n\
         \"timing\" = 'T4'\n\
         /* inline */ ports = 22,80 /* web */\n\
         [ empty ]\n",
    );

    let document = ConfigDocument::load(file.path(), &ConfigDocument::new()).unwrap();

    assert_eq!(document.get(DEFAULT_SECTION, "nmap_path"), Some("/opt/nmap/bin/nmap"));
    assert_eq!(document.get("scan", "timing"), Some("T4"));
    assert_eq!(document.get("scan", "ports"), Some("22,80"));
    // Header names are taken verbatim.
    assert!(document.contains_section(" empty "));
    assert!(!document.contains_section("empty"));
}

#[test]
fn file_saved_with_byte_order_mark_loads() {
    let file = config_file("\u{feff}[net]\nscope = 10.0.0.0/8\n");

    let document = ConfigDocument::load(file.path(), &ConfigDocument::new()).unwrap();

    assert_eq!(document.get("net", "scope"), Some("10.0.0.0/8"));
}

#[test]
fn later_files_override_earlier_ones() {
    let defaults = config_file("store_hosts = no\nnetworks = 10.0.0.0/24\n[scan]\ntiming = T3\n");
    let user = config_file("networks = \"10.0.0.0/24, 192.168.1.0/24\"\n[scan]\nretries = 2\n");

    let base = ConfigDocument::load(defaults.path(), &ConfigDocument::new()).unwrap();
    let document = ConfigDocument::load(user.path(), &base).unwrap();

    assert_eq!(document.get("scan", "timing"), Some("T3"));
    assert_eq!(document.get("scan", "retries"), Some("2"));
    // The base document is not touched by the merge.
    assert_eq!(base.get("scan", "retries"), None);

    let config = Config::from_document(&document).unwrap();
    assert!(!config.store_hosts);
    assert_eq!(config.default_networks, ["10.0.0.0/24", "192.168.1.0/24"]);
    assert_eq!(config.nmap_path, PathBuf::from("nmap"));
}

#[test]
fn statement_without_separator_names_its_line() {
    let file = config_file("[core]\n\n// fine\nnmap_path nmap\n");

    let err = ConfigDocument::load(file.path(), &ConfigDocument::new()).unwrap_err();

    match err {
        ConfigError::Syntax { line, statement } => {
            assert_eq!(line, 4);
            assert_eq!(statement, "nmap_path nmap");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.conf");

    let err = ConfigDocument::load(&path, &ConfigDocument::new()).unwrap_err();

    assert!(matches!(err, ConfigError::Io { path: p, .. } if p == path));
}

#[test]
fn bad_setting_value_is_rejected() {
    let document = ConfigDocument::parse_str("store_hosts = maybe\n", &ConfigDocument::new()).unwrap();

    let err = Config::from_document(&document).unwrap_err();

    assert!(matches!(err, ConfigError::Setting { ref key, .. } if key == "store_hosts"));
}
