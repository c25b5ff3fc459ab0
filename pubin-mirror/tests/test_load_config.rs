use pubin_mirror::cli::resolve_config;
use pubin_mirror::load_config::load_config;
use pubin_mirror_core::config::MirrorConfig;
use std::fs::write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn partial_config_keeps_remaining_defaults() {
    let config_yaml = r#"
output:
  dir: ./tmp/out
  gitmodules_file: modules.txt
retry:
  max_retries: 2
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = load_config(config_file.path()).expect("Config should load");
    let defaults = MirrorConfig::default();

    assert_eq!(config.output.dir, PathBuf::from("./tmp/out"));
    assert_eq!(config.output.gitmodules_file, "modules.txt");
    assert_eq!(config.output.listing_file, "linux-config");
    assert_eq!(config.retry.max_retries, 2);
    assert_eq!(config.retry.delay_secs, 5);
    assert_eq!(config.sources, defaults.sources);
    assert_eq!(config.blacklist, defaults.blacklist);
}

#[test]
fn blacklist_from_file_replaces_default() {
    let config_yaml = r#"
blacklist:
  vger.kernel.org:
    - netdev
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = load_config(config_file.path()).expect("Config should load");
    assert!(config.blacklist.contains("vger.kernel.org", "netdev"));
    assert!(!config.blacklist.contains("vger.kernel.org", "linux-kernel"));
    assert!(!config.blacklist.contains("dpdk.org", "dev"));
}

#[test]
fn invalid_yaml_is_reported_as_parse_error() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), b"not-yaml: [:::").unwrap();

    let msg = load_config(config_file.path()).unwrap_err().to_string();
    assert!(
        msg.contains("parse") || msg.contains("YAML"),
        "Parse error expected, got: {msg}"
    );
}

#[test]
fn output_dir_flag_overrides_defaults() {
    let config = resolve_config(None, Some(PathBuf::from("/tmp/pubin"))).unwrap();
    assert_eq!(config.output.dir, PathBuf::from("/tmp/pubin"));
    assert_eq!(config.sources, MirrorConfig::default().sources);
}
