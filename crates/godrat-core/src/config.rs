use std::{env, path::Path, time::Duration};

use crate::{errors::Error, Result};

const DEFAULT_CLASS_TABLE: &str = "class";

/// Typed configuration read from the environment (and an optional `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    // Credentials
    pub telegram_bot_token: String,
    pub supabase_url: String,
    pub supabase_api_key: String,

    // Record store
    pub class_table: String,
    pub store_request_timeout: Duration,

    // Telegram
    pub poll_timeout: Duration,
    pub telegram_message_limit: usize,

    // Logging
    pub log_json: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"))?;
        Self::from_lookup(|key: &str| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = required(&lookup, "TELEGRAM_BOT_TOKEN")?;
        let supabase_url = required(&lookup, "SUPABASE_URL")?;
        let supabase_api_key = required(&lookup, "SUPABASE_API_KEY")?;

        let supabase_url = normalize_base_url(&supabase_url)?;

        let class_table = lookup("CLASS_TABLE")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_CLASS_TABLE.to_string());
        let store_request_timeout = Duration::from_millis(
            parse_num::<u64>(&lookup, "STORE_REQUEST_TIMEOUT_MS").unwrap_or(10_000),
        );

        // Long-poll timeout; Telegram caps this at 50-60s server side.
        let poll_timeout =
            Duration::from_secs(parse_num::<u64>(&lookup, "TELEGRAM_POLL_TIMEOUT").unwrap_or(60));
        let telegram_message_limit = parse_num::<usize>(&lookup, "TELEGRAM_MESSAGE_LIMIT")
            .unwrap_or(4096)
            .clamp(64, 4096);

        let log_json = parse_bool(&lookup, "LOG_JSON").unwrap_or(false);

        Ok(Self {
            telegram_bot_token,
            supabase_url,
            supabase_api_key,
            class_table,
            store_request_timeout,
            poll_timeout,
            telegram_message_limit,
            log_json,
        })
    }
}

/// Runs before logging is up, so a broken `.env` is a startup error.
fn load_dotenv_if_present(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    // dotenvy never overrides variables that are already set.
    dotenvy::from_path(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .and_then(non_empty)
        .map(|v| v.trim().to_string())
        .ok_or_else(|| Error::Config(format!("{key} environment variable is required")))
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let url = raw.trim().trim_end_matches('/');
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(url.to_string()),
        _ => Err(Error::Config(format!(
            "SUPABASE_URL must be an absolute http(s) URL, got {raw:?}"
        ))),
    }
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    lookup(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn parse_num<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse::<T>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
