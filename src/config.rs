// src/config.rs
use std::env;
use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// About a century. Keeps `now + ttl` well inside `i64`.
const MAX_SESSION_TTL_SECS: i64 = 36_500 * SECS_PER_DAY;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub db_path: String,
    pub schema_path: String,
    pub max_workers: usize,
    /// Lifetime of a login session in seconds.
    pub session_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_path: "members.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            max_workers: 8,
            session_ttl_secs: 60 * 60 * 24 * 7,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// Read `MEMBERS_*` variables (after loading `.env` if present),
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let ttl_days: i64 = parse_or(&lookup, "MEMBERS_SESSION_TTL_DAYS", 7)?;
        let invalid_ttl = |reason: &str| ConfigError::Invalid {
            key: "MEMBERS_SESSION_TTL_DAYS",
            value: ttl_days.to_string(),
            reason: reason.into(),
        };
        if ttl_days <= 0 {
            return Err(invalid_ttl("must be positive"));
        }
        let session_ttl_secs = ttl_days
            .checked_mul(SECS_PER_DAY)
            .filter(|secs| *secs <= MAX_SESSION_TTL_SECS)
            .ok_or_else(|| invalid_ttl("too large"))?;

        let bcrypt_cost: u32 = parse_or(&lookup, "MEMBERS_BCRYPT_COST", defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "MEMBERS_BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: "must be between 4 and 31".into(),
            });
        }

        Ok(Self {
            bind_addr: parse_or(&lookup, "MEMBERS_BIND_ADDR", defaults.bind_addr)?,
            db_path: lookup("MEMBERS_DB_PATH").unwrap_or(defaults.db_path),
            schema_path: lookup("MEMBERS_SCHEMA_PATH").unwrap_or(defaults.schema_path),
            max_workers: parse_or(&lookup, "MEMBERS_MAX_WORKERS", defaults.max_workers)?,
            session_ttl_secs,
            bcrypt_cost,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
