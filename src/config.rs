//! Runtime configuration from environment variables (`.env` is loaded by the binary).

use crate::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_FILE: &str = "storage_products.json";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Backend {
    File { path: PathBuf },
    Postgres { database_url: String, max_connections: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub backend: Backend,
    pub bind_addr: String,
    pub body_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; lets tests avoid touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = match var("PRODUCTS_BACKEND").as_deref().unwrap_or("file") {
            "file" | "json" => Backend::File {
                path: PathBuf::from(var("PRODUCTS_FILE").unwrap_or_else(|| DEFAULT_FILE.into())),
            },
            "postgres" | "sql" => Backend::Postgres {
                database_url: var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", var("DATABASE_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?,
            },
            other => {
                return Err(ConfigError::Invalid {
                    key: "PRODUCTS_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        Ok(AppConfig {
            backend,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            body_limit: parse_or("BODY_LIMIT_BYTES", var("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}
