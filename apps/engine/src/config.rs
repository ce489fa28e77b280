use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub redis_url: String,
    /// Opaque identity of the session user. Authentication happens outside
    /// the engine; whoever launches it hands over an already-verified id.
    pub user_id: String,
    pub swipe_limit: u32,
    pub swipe_window_hours: i64,
    pub recommend_limit: u32,
    /// Location filter for recommendations. The sentinel `all` means the
    /// filter is not sent to the backend.
    pub location: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: require_env("API_BASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            user_id: require_env("USER_ID")?,
            swipe_limit: std::env::var("SWIPE_LIMIT")
                .unwrap_or_else(|_| "20".to_string())
                .parse::<u32>()
                .context("SWIPE_LIMIT must be a positive integer")?,
            swipe_window_hours: std::env::var("SWIPE_WINDOW_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse::<i64>()
                .context("SWIPE_WINDOW_HOURS must be a positive integer")?,
            recommend_limit: std::env::var("RECOMMEND_LIMIT")
                .unwrap_or_else(|_| "40".to_string())
                .parse::<u32>()
                .context("RECOMMEND_LIMIT must be a positive integer")?,
            location: std::env::var("LOCATION").unwrap_or_else(|_| "all".to_string()),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
