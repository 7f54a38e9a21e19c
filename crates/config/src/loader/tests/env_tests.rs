//! Environment variable handling and precedence.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::ExposeSecret;
use serial_test::serial;

use super::cleared_env;
use crate::error::ConfigError;
use crate::loader::ConfigLoader;
use crate::types::AuthStrategy;

fn with_env<F: FnOnce()>(vars: &[(&'static str, &'static str)], f: F) {
    let mut all = cleared_env();
    for &(key, value) in vars {
        all.retain(|(k, _)| *k != key);
        all.push((key, Some(value)));
    }
    temp_env::with_vars(all, f);
}

#[test]
#[serial]
fn test_env_values_are_applied() {
    with_env(
        &[
            ("CURATOR_HOSTS", "http://es.internal:9201"),
            ("CURATOR_USERNAME", "elastic"),
            ("CURATOR_PASSWORD", "s3cret"),
            ("CURATOR_TIMEOUT", "45"),
            ("CURATOR_MAX_RETRIES", "5"),
            ("CURATOR_SKIP_VERIFY", "true"),
            ("CURATOR_CA_CERTS", "/etc/ssl/ca.pem"),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.connection.hosts, "http://es.internal:9201");
            assert_eq!(config.connection.timeout, Duration::from_secs(45));
            assert_eq!(config.connection.max_retries, 5);
            assert!(!config.connection.verify_certs);
            assert_eq!(
                config.connection.tls.ca_certs,
                Some(PathBuf::from("/etc/ssl/ca.pem"))
            );
            match config.auth.strategy() {
                AuthStrategy::Basic { username, password } => {
                    assert_eq!(username, "elastic");
                    assert_eq!(password.unwrap().expose_secret(), "s3cret");
                }
                other => panic!("unexpected strategy: {other:?}"),
            }
        },
    );
}

#[test]
#[serial]
fn test_builder_overrides_env() {
    with_env(&[("CURATOR_HOSTS", "http://from-env:9200")], || {
        let config = ConfigLoader::new()
            .from_env()
            .unwrap()
            .with_hosts("http://from-flag:9200".to_string())
            .build()
            .unwrap();
        assert_eq!(config.connection.hosts, "http://from-flag:9200");
    });
}

#[test]
#[serial]
fn test_invalid_timeout_env() {
    with_env(&[("CURATOR_TIMEOUT", "thirty")], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "CURATOR_TIMEOUT"));
    });
}

#[test]
#[serial]
fn test_invalid_skip_verify_env() {
    with_env(&[("CURATOR_SKIP_VERIFY", "maybe")], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "CURATOR_SKIP_VERIFY")
        );
    });
}

#[test]
#[serial]
fn test_whitespace_env_is_ignored() {
    with_env(&[("CURATOR_HOSTS", "   ")], || {
        let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
        assert_eq!(config.connection.hosts, "http://127.0.0.1:9200");
    });
}
