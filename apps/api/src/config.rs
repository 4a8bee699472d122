use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SESSION_IDLE_MINUTES: u64 = 60;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub port: u16,
    pub rust_log: String,
    /// Body limit for the resume upload route.
    pub max_upload_bytes: usize,
    /// Directory for the short-lived PDF files written during extraction.
    /// `None` means the system temp dir.
    pub resume_temp_dir: Option<PathBuf>,
    /// How long a session may sit unused before it is dropped.
    pub session_idle_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            resume_temp_dir: std::env::var("RESUME_TEMP_DIR").ok().map(PathBuf::from),
            session_idle_ttl: Duration::from_secs(
                60 * parse_idle_minutes(std::env::var("SESSION_IDLE_MINUTES").ok().as_deref())?,
            ),
        })
    }
}

fn parse_idle_minutes(raw: Option<&str>) -> Result<u64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_SESSION_IDLE_MINUTES);
    };
    let minutes = raw
        .trim()
        .parse::<u64>()
        .context("SESSION_IDLE_MINUTES must be a whole number of minutes")?;
    if minutes == 0 {
        anyhow::bail!("SESSION_IDLE_MINUTES must be at least 1");
    }
    Ok(minutes)
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            openai_api_key: "test-key".to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            resume_temp_dir: None,
            session_idle_ttl: Duration::from_secs(60 * DEFAULT_SESSION_IDLE_MINUTES),
        }
    }
}
