//! HTTP listener settings for the triage API.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Where the chat front-end is served from in development.
const CHAT_UI_ORIGIN: &str = "http://localhost:3000";

/// Longest a single request (a full triage turn included) may run.
const MAX_TURN_TIMEOUT_SECS: u64 = 300;

/// Listener, browser access and session lifetime.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub environment: Environment,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Deadline for one HTTP request, chat turns included
    #[serde(default = "default_turn_timeout_secs")]
    pub turn_timeout_secs: u64,

    /// Browser origins allowed to call the API: `*` or a comma-separated list
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Seconds a conversation may stay untouched before it is discarded
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

/// Deployment flavour; production switches logs to JSON.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    AnyOrigin,
    Origins(Vec<String>),
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ValidationError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ValidationError::InvalidAddress(raw))
    }

    pub fn turn_timeout(&self) -> Duration {
        Duration::from_secs(self.turn_timeout_secs)
    }

    /// Idle time after which the conversation registry drops a session.
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// A `*` entry, or no entry at all, opens the API to every origin.
    pub fn cors_policy(&self) -> CorsPolicy {
        let origins: Vec<String> = self
            .cors_origin
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            CorsPolicy::AnyOrigin
        } else {
            CorsPolicy::Origins(origins)
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.turn_timeout_secs == 0 || self.turn_timeout_secs > MAX_TURN_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        // A session must outlive the turn that keeps it busy.
        if self.session_idle_secs < self.turn_timeout_secs {
            return Err(ValidationError::SessionIdleTooShort {
                min: self.turn_timeout_secs,
            });
        }
        if let CorsPolicy::Origins(origins) = self.cors_policy() {
            if let Some(bad) = origins
                .into_iter()
                .find(|o| !o.starts_with("http://") && !o.starts_with("https://"))
            {
                return Err(ValidationError::InvalidOrigin(bad));
            }
        }
        self.bind_addr()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            log_filter: default_log_filter(),
            turn_timeout_secs: default_turn_timeout_secs(),
            cors_origin: default_cors_origin(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_filter() -> String {
    "info,healthinet=debug,tower_http=debug".to_string()
}

fn default_turn_timeout_secs() -> u64 {
    30
}

fn default_cors_origin() -> String {
    CHAT_UI_ORIGIN.to_string()
}

fn default_session_idle_secs() -> u64 {
    30 * 60
}
