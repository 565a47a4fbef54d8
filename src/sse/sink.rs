//! The event-stream sink the delivery loop writes into.
//!
//! The hub core never touches HTTP: it writes frames through the
//! [`EventSink`] trait. The production implementation, [`SseSink`], hands
//! axum SSE frames to the response body over a small channel; when the
//! client disconnects, axum drops the body and the next write fails with
//! [`SinkError::Closed`].

use std::future::Future;

use axum::response::sse::Event as SseEvent;
use tokio::sync::mpsc;

use crate::domain::Notification;

/// A write into the stream failed.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The consumer of the stream is gone.
    #[error("event stream closed")]
    Closed,
}

/// Destination for one subscriber's serialized frames.
pub trait EventSink: Send {
    /// Writes one event frame (`data: <json>`).
    fn send_event(
        &mut self,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), SinkError>> + Send;

    /// Writes one comment frame (`: <text>`), used for the initial ping
    /// and keep-alive markers.
    fn send_comment(&mut self, text: &str) -> impl Future<Output = Result<(), SinkError>> + Send;
}

/// [`EventSink`] backed by the channel feeding an axum SSE response body.
#[derive(Debug)]
pub struct SseSink {
    frames: mpsc::Sender<SseEvent>,
}

impl SseSink {
    /// Creates a sink and the frame receiver to wrap as the response
    /// body stream.
    #[must_use]
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<SseEvent>) {
        let (frames, body) = mpsc::channel(buffer.max(1));
        (Self { frames }, body)
    }
}

impl EventSink for SseSink {
    async fn send_event(&mut self, notification: &Notification) -> Result<(), SinkError> {
        let frame = match SseEvent::default().json_data(notification) {
            Ok(frame) => frame,
            Err(error) => {
                tracing::warn!(%error, "failed to serialize notification");
                return Ok(());
            }
        };
        self.frames.send(frame).await.map_err(|_| SinkError::Closed)
    }

    async fn send_comment(&mut self, text: &str) -> Result<(), SinkError> {
        self.frames
            .send(SseEvent::default().comment(text))
            .await
            .map_err(|_| SinkError::Closed)
    }
}
