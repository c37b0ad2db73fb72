use rfootfall::config::Config;
use rfootfall::db::pool::StoreAddress;
use rfootfall::errors::AppError;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;

mod common;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_defaults_have_no_store_address() {
    let cfg = Config::default();
    assert_eq!(cfg.flush_interval_seconds, 600);
    assert_eq!(cfg.flush_max_size, 50);
    assert!(matches!(cfg.store_address(), Err(AppError::MissingStoreAddress)));
}

#[test]
fn test_env_overrides_file_values() {
    let home = common::setup_test_home("cfg_env");
    let path = std::path::Path::new(&home).join("rfootfall.conf");
    fs::write(&path, "database: /tmp/from_file.sqlite\nflush_max_size: 10\n").unwrap();

    let mut cfg = Config::load_file(&path).unwrap();
    assert_eq!(cfg.database, "/tmp/from_file.sqlite");
    assert_eq!(cfg.flush_max_size, 10);
    assert_eq!(cfg.flush_interval_seconds, 600, "missing keys use defaults");

    cfg.apply_env(env_of(&[
        ("FOOTFALL_DB_URL", "sqlite:///tmp/from_env.sqlite"),
        ("FLUSH_INTERVAL_SECONDS", "120"),
    ]))
    .unwrap();

    assert_eq!(cfg.store_address().unwrap(), "sqlite:///tmp/from_env.sqlite");
    let flush = cfg.flush_settings();
    assert_eq!(flush.interval, Duration::from_secs(120));
    assert_eq!(flush.max_size, 10);
}

#[test]
fn test_blank_env_address_does_not_clear_file_address() {
    let mut cfg = Config {
        database: "/tmp/keep.sqlite".to_string(),
        ..Config::default()
    };
    cfg.apply_env(env_of(&[("FOOTFALL_DB_URL", "  ")])).unwrap();
    assert_eq!(cfg.store_address().unwrap(), "/tmp/keep.sqlite");
}

#[test]
fn test_malformed_numbers_are_config_errors() {
    let mut cfg = Config::default();
    let err = cfg
        .apply_env(env_of(&[("FLUSH_MAX_SIZE", "lots")]))
        .unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_unreadable_config_file_is_reported() {
    let home = common::setup_test_home("cfg_broken");
    let path = std::path::Path::new(&home).join("rfootfall.conf");
    fs::write(&path, "flush_max_size: [not, a, number]\n").unwrap();

    assert!(matches!(Config::load_file(&path), Err(AppError::ConfigLoad(_))));
}

#[test]
fn test_store_address_forms() {
    assert_eq!(
        StoreAddress::parse("sqlite:///var/lib/ff.sqlite").unwrap(),
        StoreAddress::File("/var/lib/ff.sqlite".to_string())
    );
    assert_eq!(
        StoreAddress::parse("ff.sqlite").unwrap(),
        StoreAddress::File("ff.sqlite".to_string())
    );
    assert_eq!(StoreAddress::parse(":memory:").unwrap(), StoreAddress::Memory);
    assert_eq!(StoreAddress::parse("sqlite::memory:").unwrap(), StoreAddress::Memory);

    assert!(matches!(StoreAddress::parse(""), Err(AppError::MissingStoreAddress)));
    assert!(matches!(
        StoreAddress::parse("postgres://user@host/db"),
        Err(AppError::UnsupportedStoreAddress(_))
    ));
}
