//! Per-subscriber delivery loop.
//!
//! One loop runs per connected subscriber for the lifetime of its
//! connection, waiting on whichever comes first: an event in the inbox,
//! the done-signal, or the keep-alive period elapsing with neither.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::hub::Subscriber;

use super::sink::{EventSink, SinkError};

/// Drains the subscriber's inbox into the sink until the subscriber is
/// closed or a write fails.
///
/// Writes an initial `ping` comment on entry, then each iteration:
/// an inbox event is serialized to the sink and the keep-alive timer is
/// reset; the done-signal (or the hub dropping the inbox) ends the loop
/// with no further writes; an idle keep-alive period emits a `keepalive`
/// comment. Accepted events reach the sink in enqueue order.
///
/// # Errors
///
/// Returns [`SinkError`] when the sink rejects a write, which means the
/// client side of the stream is gone. The caller must unregister the
/// subscriber from the hub in every exit path.
pub async fn run_delivery<S: EventSink>(
    mut subscriber: Subscriber,
    mut sink: S,
    keep_alive: Duration,
) -> Result<(), SinkError> {
    sink.send_comment("ping").await?;

    let mut ticker = interval_at(Instant::now() + keep_alive, keep_alive);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            maybe = subscriber.inbox.recv() => match maybe {
                Some(notification) => {
                    sink.send_event(&notification).await?;
                    ticker.reset();
                }
                None => break,
            },
            _ = async { let _ = subscriber.done.wait_for(|closed| *closed).await; } => break,
            _ = ticker.tick() => {
                sink.send_comment("keepalive").await?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Notification, SubscriberId};
    use crate::hub::subscriber_pair;
    use tokio::sync::mpsc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Frame {
        Event(String),
        Comment(String),
    }

    #[derive(Debug)]
    struct RecordingSink {
        frames: mpsc::UnboundedSender<Frame>,
        healthy: bool,
    }

    impl RecordingSink {
        fn channel(healthy: bool) -> (Self, mpsc::UnboundedReceiver<Frame>) {
            let (frames, recorded) = mpsc::unbounded_channel();
            (Self { frames, healthy }, recorded)
        }
    }

    impl EventSink for RecordingSink {
        async fn send_event(&mut self, notification: &Notification) -> Result<(), SinkError> {
            if !self.healthy {
                return Err(SinkError::Closed);
            }
            self.frames
                .send(Frame::Event(notification.id.clone()))
                .map_err(|_| SinkError::Closed)
        }

        async fn send_comment(&mut self, text: &str) -> Result<(), SinkError> {
            if !self.healthy {
                return Err(SinkError::Closed);
            }
            self.frames
                .send(Frame::Comment(text.to_string()))
                .map_err(|_| SinkError::Closed)
        }
    }

    fn event(id: &str) -> Notification {
        let mut notification = Notification::new("content", None);
        notification.id = id.to_string();
        notification
    }

    #[tokio::test]
    async fn writes_events_in_order_until_closed() {
        let (handle, subscriber) = subscriber_pair(SubscriberId::from("s1"), 8);
        let (sink, mut recorded) = RecordingSink::channel(true);

        let loop_task =
            tokio::spawn(run_delivery(subscriber, sink, Duration::from_secs(30)));

        assert!(handle.deliver(&event("e1")));
        assert!(handle.deliver(&event("e2")));

        assert_eq!(recorded.recv().await, Some(Frame::Comment("ping".to_string())));
        assert_eq!(recorded.recv().await, Some(Frame::Event("e1".to_string())));
        assert_eq!(recorded.recv().await, Some(Frame::Event("e2".to_string())));

        handle.close();
        let result = loop_task.await;
        assert!(matches!(result, Ok(Ok(()))));
        assert_eq!(recorded.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn idle_stream_gets_keepalive_and_stays_up() {
        let (handle, subscriber) = subscriber_pair(SubscriberId::from("s1"), 8);
        let (sink, mut recorded) = RecordingSink::channel(true);

        let loop_task =
            tokio::spawn(run_delivery(subscriber, sink, Duration::from_secs(30)));

        assert_eq!(recorded.recv().await, Some(Frame::Comment("ping".to_string())));
        assert_eq!(
            recorded.recv().await,
            Some(Frame::Comment("keepalive".to_string()))
        );
        assert_eq!(
            recorded.recv().await,
            Some(Frame::Comment("keepalive".to_string()))
        );
        assert!(!loop_task.is_finished());

        handle.close();
        let result = loop_task.await;
        assert!(matches!(result, Ok(Ok(()))));
    }

    #[tokio::test(start_paused = true)]
    async fn delivered_event_resets_keepalive_timer() {
        let keep_alive = Duration::from_secs(30);
        let (handle, subscriber) = subscriber_pair(SubscriberId::from("s1"), 8);
        let (sink, mut recorded) = RecordingSink::channel(true);

        let _loop_task = tokio::spawn(run_delivery(subscriber, sink, keep_alive));
        assert_eq!(recorded.recv().await, Some(Frame::Comment("ping".to_string())));

        // Burn most of the idle period, then deliver an event.
        tokio::time::advance(Duration::from_secs(20)).await;
        assert!(handle.deliver(&event("e1")));
        assert_eq!(recorded.recv().await, Some(Frame::Event("e1".to_string())));

        // The timer restarts at delivery: the next marker is due a full
        // period after e1, not after the connect.
        tokio::time::advance(Duration::from_secs(15)).await;
        assert!(recorded.try_recv().is_err());

        tokio::time::advance(Duration::from_secs(16)).await;
        assert_eq!(
            recorded.recv().await,
            Some(Frame::Comment("keepalive".to_string()))
        );
    }

    #[tokio::test]
    async fn sink_failure_terminates_loop() {
        let (_handle, subscriber) = subscriber_pair(SubscriberId::from("s1"), 8);
        let (sink, _recorded) = RecordingSink::channel(false);

        let result = run_delivery(subscriber, sink, Duration::from_secs(30)).await;
        assert!(matches!(result, Err(SinkError::Closed)));
    }

    #[tokio::test]
    async fn done_signal_stops_writes_immediately() {
        let (handle, subscriber) = subscriber_pair(SubscriberId::from("s1"), 8);
        let (sink, mut recorded) = RecordingSink::channel(true);

        handle.close();
        let result = run_delivery(subscriber, sink, Duration::from_secs(30)).await;
        assert!(result.is_ok());

        // Only the initial ping made it out.
        assert_eq!(recorded.recv().await, Some(Frame::Comment("ping".to_string())));
        assert_eq!(recorded.recv().await, None);
    }
}
