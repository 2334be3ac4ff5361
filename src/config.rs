//! Client configuration loaded from environment variables.

use crate::views::CancelPolicy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the booking API (no trailing slash)
    pub api_url: String,
    /// Directory holding the persisted credential
    pub credential_dir: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// What to do with a cancellation the server rejects
    pub cancel_policy: CancelPolicy,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            api_url: "http://127.0.0.1:5000".to_string(),
            credential_dir: env::temp_dir().join("event-booking-test"),
            request_timeout: Duration::from_secs(5),
            cancel_policy: CancelPolicy::default(),
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("BOOKING_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid("BOOKING_API_URL", api_url));
        }

        let credential_dir = match env::var("BOOKING_CREDENTIAL_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::var("HOME")
                .map(|home| PathBuf::from(home).join(".event-booking"))
                .unwrap_or_else(|_| PathBuf::from(".event-booking")),
        };

        let request_timeout = match env::var("BOOKING_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid("BOOKING_REQUEST_TIMEOUT_SECS", raw))?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let cancel_policy = match env::var("BOOKING_CANCEL_POLICY") {
            Ok(raw) => CancelPolicy::parse(&raw)
                .ok_or(ConfigError::Invalid("BOOKING_CANCEL_POLICY", raw))?,
            Err(_) => CancelPolicy::default(),
        };

        Ok(Self {
            api_url,
            credential_dir,
            request_timeout,
            cancel_policy,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
