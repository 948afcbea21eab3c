use finance_lib::config::{Config, DatabaseConfig};
use rstest::rstest;
use std::env;
use std::fs;
use uuid::Uuid;

#[test]
fn test_parse_full_config() {
    let config = Config::parse(
        r#"
        log_level = "debug"

        [database]
        url = "postgres://ledger@localhost/ledger"
        max_pool_size = 4
        "#,
    )
    .unwrap();

    assert_eq!(
        config,
        Config {
            database: Some(DatabaseConfig {
                url: "postgres://ledger@localhost/ledger".to_string(),
                max_pool_size: 4,
            }),
            log_level: "debug".to_string(),
        }
    );
}

#[test]
fn test_parse_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.log_level, "info");

    let config = Config::parse("[database]\nurl = \"postgres://localhost/ledger\"").unwrap();
    assert_eq!(config.database.unwrap().max_pool_size, 10);
}

#[rstest]
#[case::missing_url("[database]\nmax_pool_size = 4")]
#[case::negative_pool_size("[database]\nurl = \"postgres://localhost\"\nmax_pool_size = -1")]
#[case::not_toml("log_level = ")]
fn test_parse_invalid(#[case] config: &str) {
    assert!(Config::parse(config).is_err());
}

#[test]
fn test_from_file() {
    let path = env::temp_dir().join(format!("finance-config-{}.toml", Uuid::new_v4()));
    fs::write(&path, "log_level = \"warn\"\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.database, None);

    fs::remove_file(&path).unwrap();
    let result = Config::from_file(&path);
    assert!(result.is_err());
}

// the only test in this binary touching these variables
#[test]
fn test_from_env() {
    env::remove_var("DATABASE_URL");
    env::remove_var("DATABASE_MAX_POOL_SIZE");
    env::remove_var("LOG_LEVEL");
    assert_eq!(Config::from_env().unwrap(), Config::default());

    env::set_var("DATABASE_URL", "postgres://localhost/ledger");
    env::set_var("LOG_LEVEL", "trace");
    let config = Config::from_env().unwrap();
    assert_eq!(
        config.database,
        Some(DatabaseConfig {
            url: "postgres://localhost/ledger".to_string(),
            max_pool_size: 10,
        })
    );
    assert_eq!(config.log_level, "trace");

    env::set_var("DATABASE_MAX_POOL_SIZE", "3");
    let config = Config::from_env().unwrap();
    assert_eq!(config.database.unwrap().max_pool_size, 3);

    env::set_var("DATABASE_MAX_POOL_SIZE", "many");
    assert!(Config::from_env().is_err());

    env::remove_var("DATABASE_URL");
    env::remove_var("DATABASE_MAX_POOL_SIZE");
    env::remove_var("LOG_LEVEL");
}
