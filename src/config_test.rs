use std::collections::HashMap;

use super::*;

fn config_from(pairs: &[(&str, &str)]) -> Result<HostingConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    HostingConfig::from_lookup(|key| vars.get(key).cloned())
}

// =============================================================================
// parse_bool
// =============================================================================

#[test]
fn parse_bool_true_variants() {
    for val in ["1", "true", "yes", "on", "TRUE", "On", "  true  "] {
        assert_eq!(parse_bool(val), Some(true), "expected true for {val:?}");
    }
}

#[test]
fn parse_bool_false_variants() {
    for val in ["0", "false", "no", "off", "FALSE"] {
        assert_eq!(parse_bool(val), Some(false), "expected false for {val:?}");
    }
}

#[test]
fn parse_bool_invalid_returns_none() {
    assert_eq!(parse_bool("maybe"), None);
    assert_eq!(parse_bool(""), None);
}

// =============================================================================
// HostingConfig
// =============================================================================

#[test]
fn defaults_when_nothing_set() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.database_url, None);
    assert_eq!(config.port, 3000);
    assert_eq!(config.db_max_connections, 5);
    assert_eq!(config.site_root, PathBuf::from("client/public"));
    assert!(!config.cookie_secure);
    assert_eq!(config.identity, IdentityOptions::default());
    assert!(config.identity.require_confirmed_account);
}

#[test]
fn reads_every_variable() {
    let config = config_from(&[
        ("DATABASE_URL", "postgres://localhost/identity"),
        ("DB_MAX_CONNECTIONS", "12"),
        ("PORT", "8080"),
        ("SITE_ROOT", "/srv/site"),
        ("COOKIE_SECURE", "yes"),
        ("REQUIRE_CONFIRMED_ACCOUNT", "false"),
        ("MIN_PASSWORD_LENGTH", "10"),
    ])
    .unwrap();
    assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/identity"));
    assert_eq!(config.db_max_connections, 12);
    assert_eq!(config.port, 8080);
    assert_eq!(config.site_root, PathBuf::from("/srv/site"));
    assert!(config.cookie_secure);
    assert!(!config.identity.require_confirmed_account);
    assert_eq!(config.identity.min_password_length, 10);
}

#[test]
fn empty_values_count_as_unset() {
    let config = config_from(&[("DATABASE_URL", "  "), ("PORT", "")]).unwrap();
    assert_eq!(config.database_url, None);
    assert_eq!(config.port, 3000);
}

#[test]
fn malformed_port_is_an_error() {
    assert_eq!(
        config_from(&[("PORT", "eighty")]),
        Err(ConfigError::Invalid { key: "PORT", value: "eighty".to_owned() })
    );
}

#[test]
fn malformed_flag_is_an_error() {
    assert!(matches!(
        config_from(&[("REQUIRE_CONFIRMED_ACCOUNT", "sometimes")]),
        Err(ConfigError::Invalid { key: "REQUIRE_CONFIRMED_ACCOUNT", .. })
    ));
}
