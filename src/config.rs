//! Process configuration, read from the environment once at startup.

use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::logging::LogFormat;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_PORT: &str = "5432";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreBackend,
    pub host: IpAddr,
    pub port: u16,
    pub log_format: LogFormat,
    pub log_dir: PathBuf,
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store = match lookup("STORE_BACKEND").as_deref() {
            None | Some("postgres") => StoreBackend::Postgres {
                database_url: database_url(&lookup)?,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let host = match lookup("HOST") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "HOST", value })?,
            None => IpAddr::from([127, 0, 0, 1]),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("compact") => LogFormat::Compact,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            store,
            host,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            log_format,
            log_dir: PathBuf::from(lookup("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())),
        })
    }
}

/// `DATABASE_URL` if set, otherwise built from the individual `DB_*` variables.
fn database_url(lookup: &impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    if let Some(url) = lookup("DATABASE_URL") {
        return Ok(url);
    }

    let require = |var: &'static str| lookup(var).ok_or(ConfigError::Missing(var));
    let user = require("DB_USER")?;
    let pass = require("DB_PASS")?;
    let host = require("DB_HOST")?;
    let name = require("DB_NAME")?;
    let port = lookup("DB_PORT").unwrap_or_else(|| DEFAULT_DB_PORT.to_string());

    Ok(format!("postgresql://{user}:{pass}@{host}:{port}/{name}"))
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}
