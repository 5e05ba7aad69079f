use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// Base URL of the remote scheduler API, without trailing slash
    pub api_base_url: String,
    pub session_secret: String,
    pub session_ttl: u64,
    pub api_timeout_secs: u64,

    // Shift polling; an interval of 0 turns that loop off
    pub miss_grace_minutes: i64,
    pub miss_sweep_interval_secs: u64,
    pub notify_interval_secs: u64,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_register_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,
}

fn required(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

fn or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            api_base_url: required("API_BASE_URL")?.trim_end_matches('/').to_string(),
            session_secret: required("SESSION_SECRET")?,
            session_ttl: or_default("SESSION_TTL", 28_800)?, // 8 hours
            api_timeout_secs: or_default("API_TIMEOUT_SECS", 15)?,

            miss_grace_minutes: or_default("MISS_GRACE_MINUTES", 15)?,
            miss_sweep_interval_secs: or_default("MISS_SWEEP_INTERVAL_SECS", 60)?,
            notify_interval_secs: or_default("NOTIFY_INTERVAL_SECS", 30)?,

            rate_login_per_min: or_default("RATE_LOGIN_PER_MIN", 60)?,
            rate_register_per_min: or_default("RATE_REGISTER_PER_MIN", 30)?,
            rate_protected_per_min: or_default("RATE_PROTECTED_PER_MIN", 1000)?,

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),
        })
    }

    /// Settings pointed at `api_base_url` with background polling off.
    pub fn for_api(api_base_url: impl Into<String>) -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            session_secret: "local-session-secret".to_string(),
            session_ttl: 3_600,
            api_timeout_secs: 5,
            miss_grace_minutes: 15,
            miss_sweep_interval_secs: 0,
            notify_interval_secs: 0,
            rate_login_per_min: 600,
            rate_register_per_min: 600,
            rate_protected_per_min: 10_000,
            api_prefix: "/api".to_string(),
        }
    }
}
