use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::srs::DEFAULT_PROMOTE_THRESHOLD;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    /// `None` means any origin is allowed.
    pub cors_origin: Option<String>,
    /// Consecutive correct answers needed to promote an item.
    pub promote_threshold: NonZeroU32,
    pub max_lessons_per_day: u32,
    pub learner_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://kotoba.db?mode=rwc".to_string(),
            db_max_connections: 5,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_origin: None,
            promote_threshold: DEFAULT_PROMOTE_THRESHOLD,
            max_lessons_per_day: 15,
            learner_id: "default".to_string(),
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse_or(
                get("DB_MAX_CONNECTIONS"),
                "DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,
            bind_addr: parse_or(get("BIND_ADDR"), "BIND_ADDR", defaults.bind_addr)?,
            cors_origin: get("CORS_ORIGIN"),
            promote_threshold: parse_or(
                get("PROMOTE_THRESHOLD"),
                "PROMOTE_THRESHOLD",
                defaults.promote_threshold,
            )?,
            max_lessons_per_day: parse_or(
                get("MAX_LESSONS_PER_DAY"),
                "MAX_LESSONS_PER_DAY",
                defaults.max_lessons_per_day,
            )?,
            learner_id: get("LEARNER_ID").unwrap_or(defaults.learner_id),
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v.trim().parse().with_context(|| format!("invalid {}: '{}'", key, v)),
        None => Ok(default),
    }
}
