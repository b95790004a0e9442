use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::{Error, Result};

/// Name of the cookie carrying a visitor's anonymous identity.
pub const DEFAULT_COOKIE_NAME: &str = "ecasm_uid";

/// Compiles a visitor may run before being asked to register.
pub const DEFAULT_FREE_COMPILE_LIMIT: u64 = 5;

/// One year, in seconds.
pub const DEFAULT_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 365;

/// Main configuration for the playground server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,

    /// JSON file holding the compile count of every visitor
    pub usage_file: PathBuf,

    pub free_compile_limit: u64,

    pub cookie: CookieConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieConfig {
    pub name: String,
    pub max_age_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
            usage_file: PathBuf::from("usage.json"),
            free_compile_limit: DEFAULT_FREE_COMPILE_LIMIT,
            cookie: CookieConfig {
                name: DEFAULT_COOKIE_NAME.to_string(),
                max_age_secs: DEFAULT_COOKIE_MAX_AGE,
            },
        }
    }
}

impl Config {
    /// Start from the defaults and apply any `CASM_*` environment variables that are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("CASM_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("CASM_PORT") {
            config.port = parse_var("CASM_PORT", &port)?;
        }
        if let Some(path) = lookup("CASM_USAGE_FILE") {
            config.usage_file = PathBuf::from(path);
        }
        if let Some(limit) = lookup("CASM_FREE_COMPILE_LIMIT") {
            config.free_compile_limit = parse_var("CASM_FREE_COMPILE_LIMIT", &limit)?;
        }

        Ok(config)
    }

    /// Load config from a JSON file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Get the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} has an invalid value: {value:?}")))
}
