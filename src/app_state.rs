//! Shared application state injected into the hub's Axum handlers.

use std::time::Duration;

use crate::config::HubConfig;
use crate::hub::Hub;

/// Shared state available to all hub handlers via Axum's `State`
/// extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Handle to the hub control loop.
    pub hub: Hub,
    /// Capacity of each new subscriber's inbox.
    pub inbox_capacity: usize,
    /// Keep-alive period for idle streams.
    pub keep_alive: Duration,
}

impl AppState {
    /// Builds the hub service state from its configuration.
    #[must_use]
    pub fn new(hub: Hub, config: &HubConfig) -> Self {
        Self {
            hub,
            inbox_capacity: config.inbox_capacity,
            keep_alive: config.keep_alive(),
        }
    }
}
