use std::{env::var, path::PathBuf, time::Duration};

use anyhow::{Context, Result, bail};
use stock::{DEFAULT_BASE_API, DEFAULT_TIMEOUT};

pub const DEFAULT_LOG_FILE: &str = "stockbot-{date}.log";
pub const DEFAULT_RETENTION_DAYS: usize = 14;
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct Config {
    pub discord_token: String,
    pub version: String,
    pub port: u16,
    pub keep_alive_url: Option<String>,
    pub quote_api_base: String,
    pub quote_timeout: Duration,
    pub log: Option<LogConfig>,
}

/// File logging, enabled by LOG_DIR.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub dir: PathBuf,
    /// File name with an optional `{date}` placeholder.
    pub file_pattern: String,
    pub retention_days: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let discord_token = get("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .context("DISCORD_TOKEN not set")?;

        let port = match get("PORT") {
            Some(p) => p.parse().with_context(|| format!("invalid PORT: {p}"))?,
            None => DEFAULT_PORT,
        };

        let quote_timeout = match get("QUOTE_API_TIMEOUT_SECS") {
            Some(s) => Duration::from_secs(positive("QUOTE_API_TIMEOUT_SECS", &s)?),
            None => DEFAULT_TIMEOUT,
        };

        let log = match get("LOG_DIR").filter(|d| !d.trim().is_empty()) {
            Some(dir) => {
                let retention_days = match get("LOG_RETENTION_DAYS") {
                    Some(d) => positive("LOG_RETENTION_DAYS", &d)? as usize,
                    None => DEFAULT_RETENTION_DAYS,
                };

                Some(LogConfig {
                    dir: PathBuf::from(dir),
                    file_pattern: get("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
                    retention_days,
                })
            }
            None => None,
        };

        Ok(Self {
            discord_token,
            version: get("APP_VERSION").unwrap_or_else(|| "Unknown".to_string()),
            port,
            keep_alive_url: get("KEEP_ALIVE_URL").filter(|u| !u.trim().is_empty()),
            quote_api_base: get("QUOTE_API_BASE_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_API.to_string()),
            quote_timeout,
            log,
        })
    }
}

fn positive(key: &str, value: &str) -> Result<u64> {
    let n: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("invalid {key}: {value}"))?;
    if n == 0 {
        bail!("invalid {key}: must be greater than 0");
    }
    Ok(n)
}
