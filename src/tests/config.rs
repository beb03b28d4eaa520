use crate::api::subreg::API_BASE_URL;
use crate::config::{config_path, load_config, parse_config, ConfigError, DEFAULT_CONFIG_FILE};
use crate::ip::IP_SERVICE_URL;
use std::fs;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const FULL_CONFIG: &str = r#"
subreg:
  user: "login"
  password: "hunter2"
  domain: "example.org"
  subdomain: "home"
api_url: "http://localhost:8080/api"
ip_service_url: "http://localhost:8081"
timeout_secs: 5
"#;

#[test]
fn test_config_deserialization() {
    let config = parse_config(FULL_CONFIG).unwrap();

    assert_eq!(config.subreg.user, "login");
    assert_eq!(config.subreg.password, "hunter2");
    assert_eq!(config.subreg.domain, "example.org");
    assert_eq!(config.subreg.subdomain, "home");
    assert_eq!(config.api_url, "http://localhost:8080/api");
    assert_eq!(config.ip_service_url, "http://localhost:8081");
    assert_eq!(config.timeout_secs, 5);
}

#[test]
fn test_config_defaults() {
    let config = parse_config(
        r#"
subreg:
  user: "login"
  password: "hunter2"
  domain: "example.org"
"#,
    )
    .unwrap();

    assert_eq!(config.subreg.subdomain, "");
    assert_eq!(config.api_url, API_BASE_URL);
    assert_eq!(config.ip_service_url, IP_SERVICE_URL);
    assert_eq!(config.timeout_secs, 30);
}

#[test]
fn test_invalid_config() {
    let err = parse_config(
        r#"
subreg:
  user: "login"
  # missing required fields
"#,
    )
    .unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_empty_values_are_rejected() {
    let empty_domain = r#"
subreg:
  user: "login"
  password: "hunter2"
  domain: ""
"#;
    let zero_timeout = r#"
subreg:
  user: "login"
  password: "hunter2"
  domain: "example.org"
timeout_secs: 0
"#;

    assert!(matches!(
        parse_config(empty_domain),
        Err(ConfigError::Invalid(_))
    ));
    let err = parse_config(zero_timeout).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("Timeout must be greater than 0"));
}

#[test]
fn test_debug_hides_password() {
    let config = parse_config(FULL_CONFIG).unwrap();

    let debug = format!("{:?}", config);
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("example.org"));
}

#[test]
fn test_load_config_from_file() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, FULL_CONFIG).unwrap();

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.subreg.domain, "example.org");
}

#[test]
fn test_load_config_errors_name_the_file() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, "subreg: [").unwrap();

    match load_config(temp_file.path()) {
        Err(ConfigError::Parse { path, .. }) => assert_eq!(path, temp_file.path()),
        other => panic!("unexpected result: {:?}", other),
    }

    let missing = load_config("/nonexistent/subreg-ddns.yaml");
    assert!(matches!(missing, Err(ConfigError::Read { .. })));
}

#[test]
fn test_config_path_precedence() {
    assert_eq!(
        config_path(Some("arg.yaml".into()), Some("env.yaml".into())),
        PathBuf::from("arg.yaml")
    );
    assert_eq!(
        config_path(None, Some("env.yaml".into())),
        PathBuf::from("env.yaml")
    );
    assert_eq!(config_path(None, None), PathBuf::from(DEFAULT_CONFIG_FILE));
}
