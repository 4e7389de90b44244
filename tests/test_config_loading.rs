//! Configuration loading tests

use std::io::Write;
use tempfile::NamedTempFile;
use transactor::config::{ConfigError, TransactorConfig};
use transactor::protocol::Priority;
use transactor::queue::OrderPolicy;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_full_configuration() {
    let file = write_config(
        r#"
        [queue]
        high = 5
        airmail = 2

        [demo]
        producers = 4
        requests_per_producer = 3
        order = "shuffled"
        "#,
    );

    let config = TransactorConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.queue.get(Priority::High), Some(5));
    assert_eq!(config.queue.get(Priority::Airmail), Some(2));
    assert_eq!(config.queue.get(Priority::Normal), None);
    assert_eq!(config.demo.producers, 4);
    assert_eq!(config.demo.order, OrderPolicy::Shuffled);
}

#[test]
fn test_load_empty_file_yields_defaults() {
    let file = write_config("");
    let config = TransactorConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config, TransactorConfig::default());
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = TransactorConfig::load_from_file("/nonexistent/transactor.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_load_malformed_toml_is_parse_error() {
    let file = write_config("[queue\nhigh = ");
    let err = TransactorConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_rejects_invalid_demo_section() {
    let file = write_config("[demo]\nproducers = 0\n");
    let err = TransactorConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_priority_name_fails_to_parse() {
    let file = write_config("[demo]\norder = \"urgent-first\"\n");
    let err = TransactorConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}
