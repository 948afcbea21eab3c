use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use std::{env, fs};

const DEFAULT_MAX_POOL_SIZE: u32 = 10;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Deserialize, Debug, PartialEq)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
}

/// Without a `[database]` table the ledger is kept in memory.
#[derive(Deserialize, Debug, PartialEq)]
pub struct Config {
    pub database: Option<DatabaseConfig>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_pool_size() -> u32 {
    DEFAULT_MAX_POOL_SIZE
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config, anyhow::Error> {
        let config = fs::read_to_string(path).context("Unable to read config file")?;
        Config::parse(config.as_str())
    }

    pub fn parse(config: &str) -> Result<Config, anyhow::Error> {
        let config: Config = toml::from_str(config).with_context(|| "Unable to parse config")?;
        Ok(config)
    }

    /// Reads `DATABASE_URL`, `DATABASE_MAX_POOL_SIZE` and `LOG_LEVEL`. All are optional.
    pub fn from_env() -> Result<Config, anyhow::Error> {
        let database = match read_env("DATABASE_URL") {
            Some(url) => {
                let max_pool_size = match read_env("DATABASE_MAX_POOL_SIZE") {
                    Some(size) => size
                        .parse()
                        .context("Unable to parse DATABASE_MAX_POOL_SIZE value")?,
                    None => DEFAULT_MAX_POOL_SIZE,
                };
                Some(DatabaseConfig { url, max_pool_size })
            }
            None => None,
        };
        let log_level = read_env("LOG_LEVEL").unwrap_or_else(default_log_level);

        Ok(Config {
            database,
            log_level,
        })
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}
