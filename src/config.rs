use std::env;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const DATABASE_URL_VAR: &str = "BLOG_STORE_DATABASE_URL";
pub const POOL_SIZE_VAR: &str = "BLOG_STORE_POOL_SIZE";
pub const BUSY_TIMEOUT_VAR: &str = "BLOG_STORE_BUSY_TIMEOUT_MS";

const DEFAULT_DATABASE_URL: &str = "blog-store.db";
const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub pool_size: u32,
    /// How long a connection waits on a locked database before failing.
    pub busy_timeout_ms: u32,
}

impl Config {
    pub fn new<S: Into<String>>(database_url: S) -> Self {
        Config {
            database_url: database_url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// Reads `.env` if present, then the `BLOG_STORE_*` variables.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup(DATABASE_URL_VAR).unwrap_or_else(|| String::from(DEFAULT_DATABASE_URL));
        let pool_size = parse_var(&lookup, POOL_SIZE_VAR)?.unwrap_or(DEFAULT_POOL_SIZE);
        let busy_timeout_ms =
            parse_var(&lookup, BUSY_TIMEOUT_VAR)?.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);

        if pool_size == 0 {
            return Err(Error::Config(format!("{} must be at least 1", POOL_SIZE_VAR)));
        }

        Ok(Config {
            database_url,
            pool_size,
            busy_timeout_ms,
        })
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url == ":memory:"
    }

    /// In-memory databases are private to their connection, so they get a pool of one.
    pub fn effective_pool_size(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            self.pool_size
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} is not a valid number: {:?}", key, raw))),
    }
}
