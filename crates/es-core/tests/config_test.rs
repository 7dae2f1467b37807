use es_core::config::{Config, ConfigError};

#[test]
fn default_config_is_valid() {
    let cfg = Config::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.general.app_name, "Env Stamp");
    assert_eq!(cfg.general.log_level, "info");
    assert!(cfg.storage.data_dir.is_none());
    assert_eq!(cfg.metrics.sample_interval_secs, 30);
    assert_eq!(cfg.metrics.max_samples, 100);
    assert_eq!(cfg.services.probe_timeout_ms, 1500);
    assert_eq!(cfg.services.probe_ports[0], 5173);
}

#[test]
fn partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[general]
app_name = "Stamp QA"

[metrics]
max_samples = 20
"#,
    )
    .unwrap();

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.general.app_name, "Stamp QA");
    assert_eq!(cfg.general.log_level, "info");
    assert_eq!(cfg.metrics.max_samples, 20);
    assert_eq!(cfg.metrics.sample_interval_secs, 30);
    assert_eq!(cfg.services.probe_timeout_ms, 1500);
}

#[test]
fn empty_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();
    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.metrics.max_samples, 100);
}

#[test]
fn zero_values_fail_validation() {
    let mut cfg = Config::default();
    cfg.metrics.sample_interval_secs = 0;
    assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));

    let mut cfg = Config::default();
    cfg.metrics.max_samples = 0;
    assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));

    let mut cfg = Config::default();
    cfg.services.probe_timeout_ms = 0;
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("probe_timeout_ms"));
}

#[test]
fn invalid_file_reports_parse_and_validation_errors() {
    let dir = tempfile::tempdir().unwrap();

    let bad = dir.path().join("bad.toml");
    std::fs::write(&bad, "[metrics\nmax_samples = ").unwrap();
    assert!(matches!(Config::load_from(&bad), Err(ConfigError::Parse(_))));

    let zero = dir.path().join("zero.toml");
    std::fs::write(&zero, "[metrics]\nsample_interval_secs = 0\n").unwrap();
    assert!(matches!(
        Config::load_from(&zero),
        Err(ConfigError::Validation(_))
    ));

    let missing = dir.path().join("missing.toml");
    assert!(matches!(Config::load_from(&missing), Err(ConfigError::Io(_))));
}

#[test]
fn toml_roundtrip() {
    let mut cfg = Config::default();
    cfg.storage.data_dir = Some("/var/lib/env-stamp".into());
    cfg.services.probe_ports = vec![8080];

    let text = cfg.to_toml().unwrap();
    let back: Config = toml::from_str(&text).unwrap();
    assert_eq!(back.storage.data_dir.as_deref(), Some("/var/lib/env-stamp"));
    assert_eq!(back.services.probe_ports, vec![8080]);
    assert_eq!(back.general.app_name, cfg.general.app_name);
}
