use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORE_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOG_FILE: &str = "quiz_debug.log";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_url: String,
    pub log_file: PathBuf,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads `QUIZ_STORE_URL`, `QUIZ_LOG_FILE` and `QUIZ_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values and unparseable timeouts fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let store_url = get("QUIZ_STORE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.store_url);
        let log_file = get("QUIZ_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);
        let http_timeout = get("QUIZ_HTTP_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        Self {
            store_url,
            log_file,
            http_timeout,
        }
    }
}
