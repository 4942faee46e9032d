use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

/// Typed configuration for the relay bot.
///
/// Everything comes from the process environment (plus an optional `.env`
/// file); the two API credentials are required and missing values fail the
/// process before it starts polling.
#[derive(Clone, Debug)]
pub struct Config {
    // Credentials
    pub telegram_bot_token: String,
    pub openai_api_key: String,

    // Endpoints / storage
    pub openai_api_base: String,
    pub database_url: String,

    // Runtime constants
    pub telegram_message_limit: usize,
    pub completion_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        // Required env vars
        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let openai_api_key = env_str("OPENAI_API_KEY").unwrap_or_default();
        if openai_api_key.trim().is_empty() {
            return Err(Error::Config(
                "OPENAI_API_KEY environment variable is required".to_string(),
            ));
        }

        let openai_api_base = env_str("OPENAI_API_BASE")
            .and_then(non_empty)
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string());

        let database_url = env_str("DATABASE_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| "sqlite:lrb.db".to_string());

        let telegram_message_limit = env_usize("TELEGRAM_MESSAGE_LIMIT").unwrap_or(4096);
        let completion_timeout =
            Duration::from_millis(env_u64("COMPLETION_TIMEOUT_MS").unwrap_or(120_000));

        Ok(Self {
            telegram_bot_token,
            openai_api_key,
            openai_api_base,
            database_url,
            telegram_message_limit,
            completion_timeout,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
