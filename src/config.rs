//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Each binary loads exactly one of the
//! config structs below at startup.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

/// Notification hub configuration.
///
/// Loaded once at startup via [`HubConfig::from_env`].
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8081`).
    pub listen_addr: SocketAddr,

    /// Capacity of each subscriber's bounded inbox. When an inbox is
    /// full, broadcasts to that subscriber are dropped.
    pub inbox_capacity: usize,

    /// Seconds of idleness before a keep-alive comment is written to a
    /// subscriber's stream.
    pub keep_alive_secs: u64,
}

impl HubConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            listen_addr: parse_listen_addr("0.0.0.0:8081")?,
            inbox_capacity: parse_env("SUBSCRIBER_INBOX_CAPACITY", 256),
            keep_alive_secs: parse_env("KEEP_ALIVE_SECS", 30),
        })
    }

    /// Keep-alive period as a [`Duration`], clamped to at least one
    /// second.
    #[must_use]
    pub fn keep_alive(&self) -> Duration {
        Duration::from_secs(self.keep_alive_secs.max(1))
    }
}

/// Configuration for the stateless arithmetic workers (sum, mul).
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,
}

impl WorkerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            listen_addr: parse_listen_addr("0.0.0.0:8080")?,
        })
    }
}

/// Configuration for the calc aggregator service.
#[derive(Debug, Clone)]
pub struct CalcConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Base URL of the sum worker.
    pub sum_service_url: String,

    /// Base URL of the mul worker.
    pub mul_service_url: String,

    /// Timeout in seconds for each upstream worker request.
    pub upstream_timeout_secs: u64,
}

impl CalcConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            listen_addr: parse_listen_addr("0.0.0.0:8080")?,
            sum_service_url: std::env::var("SUM_SERVICE_URL")
                .unwrap_or_else(|_| "http://sum-service".to_string()),
            mul_service_url: std::env::var("MUL_SERVICE_URL")
                .unwrap_or_else(|_| "http://mul-service".to_string()),
            upstream_timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", 5),
        })
    }
}

/// Configuration for the message-submission service.
#[derive(Debug, Clone)]
pub struct MessageConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Base URL of the notification hub the service forwards to.
    pub notification_service_url: String,
}

impl MessageConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            listen_addr: parse_listen_addr("0.0.0.0:8080")?,
            notification_service_url: std::env::var("NOTIFICATION_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
        })
    }
}

/// Parses `LISTEN_ADDR`, falling back to `default` when unset.
fn parse_listen_addr(default: &str) -> anyhow::Result<SocketAddr> {
    std::env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .context("LISTEN_ADDR must be a socket address like 0.0.0.0:8080")
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
