//! # pulse-hub
//!
//! A small set of cooperating HTTP services built around a real-time
//! notification hub. The hub fans published notifications out to an
//! arbitrary number of Server-Sent-Events subscribers without ever
//! blocking the publisher; the companion services (two arithmetic
//! workers, a fan-out aggregator, and a message-submission endpoint)
//! exercise it.
//!
//! ## Architecture
//!
//! ```text
//! Publishers (POST /notify, message-service)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── Hub control loop (hub/)
//!     │       └── Registry of live subscribers
//!     │
//!     └── Per-subscriber delivery loops (sse/)
//!             └── SSE streams to clients (GET /events)
//! ```
//!
//! The hub serializes all membership mutation and fan-out through one
//! control-loop task; each subscriber owns a bounded inbox drained by
//! its own delivery task. Delivery is best-effort: a full inbox drops
//! the event for that subscriber only.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod hub;
pub mod sse;
