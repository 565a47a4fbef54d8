//! Server-Sent-Events transport: sink abstraction, per-subscriber
//! delivery loop, and the `GET /events` stream handler.

pub mod delivery;
pub mod handler;
pub mod sink;

pub use delivery::run_delivery;
pub use sink::{EventSink, SinkError, SseSink};
