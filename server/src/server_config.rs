use std::time::Duration;

use common::config::Validate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;
pub const ALLOWED_ORIGINS_ENV: &str = "ALLOWED_ORIGINS";
pub const ANY_ORIGIN: &str = "*";

const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:8080",
    "http://localhost:3000",
    "http://127.0.0.1:8080",
    "http://127.0.0.1:3000",
    "https://sidvalecha.com",
    "https://www.sidvalecha.com",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub allowed_origins: Vec<String>,
    pub session_ttl_secs: u64,
    pub cleanup_interval_secs: u64,
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
            session_ttl_secs: DEFAULT_SESSION_TTL.as_secs(),
            cleanup_interval_secs: DEFAULT_CLEANUP_INTERVAL.as_secs(),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bind_address.trim().is_empty() {
            return Err("bind_address must not be empty".to_string());
        }
        if self.session_ttl_secs == 0 {
            return Err("session_ttl_secs must be greater than 0".to_string());
        }
        if self.cleanup_interval_secs == 0 {
            return Err("cleanup_interval_secs must be greater than 0".to_string());
        }
        if self.max_sessions == 0 {
            return Err("max_sessions must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl ServerConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == ANY_ORIGIN)
    }

    /// Comma-separated origins replace the configured list. Blank entries
    /// are dropped; an all-blank value leaves the config untouched.
    pub fn apply_allowed_origins(&mut self, value: &str) {
        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if !origins.is_empty() {
            self.allowed_origins = origins;
        }
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var(ALLOWED_ORIGINS_ENV) {
            self.apply_allowed_origins(&value);
        }
    }
}
