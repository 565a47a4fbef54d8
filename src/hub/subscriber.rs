//! Subscriber channel pair.
//!
//! A subscriber is split in two at creation: the [`SubscriberHandle`] side
//! lives in the hub's registry and is the only writer into the bounded
//! inbox; the [`Subscriber`] side is moved into the connection's delivery
//! loop and is the only reader. The done-signal is a `watch` channel the
//! hub fires on unregistration.

use tokio::sync::{mpsc, watch};

use crate::domain::{Notification, SubscriberId};

/// Registry-side half of a subscriber.
///
/// Owned exclusively by the hub control loop while the subscriber is
/// registered. Dropping it closes the inbox; [`SubscriberHandle::close`]
/// additionally fires the done-signal.
#[derive(Debug)]
pub struct SubscriberHandle {
    pub(crate) id: SubscriberId,
    pub(crate) inbox: mpsc::Sender<Notification>,
    pub(crate) done: watch::Sender<bool>,
}

impl SubscriberHandle {
    /// Returns the subscriber's identity.
    #[must_use]
    pub fn id(&self) -> &SubscriberId {
        &self.id
    }

    /// Offers one notification to the inbox without blocking.
    ///
    /// Returns `false` when the inbox is full or already closed; the
    /// event is dropped for this subscriber in that case.
    pub(crate) fn deliver(&self, notification: &Notification) -> bool {
        self.inbox.try_send(notification.clone()).is_ok()
    }

    /// Fires the done-signal and releases the inbox writer.
    pub(crate) fn close(self) {
        let _ = self.done.send(true);
    }
}

/// Delivery-side half of a subscriber.
///
/// Moved into the per-connection delivery loop, which drains the inbox
/// and watches the done-signal.
#[derive(Debug)]
pub struct Subscriber {
    pub(crate) id: SubscriberId,
    pub(crate) inbox: mpsc::Receiver<Notification>,
    pub(crate) done: watch::Receiver<bool>,
}

impl Subscriber {
    /// Returns the subscriber's identity.
    #[must_use]
    pub fn id(&self) -> &SubscriberId {
        &self.id
    }
}

/// Builds a connected handle/subscriber pair with a bounded inbox.
///
/// A capacity of zero is rounded up to one.
#[must_use]
pub fn subscriber_pair(id: SubscriberId, inbox_capacity: usize) -> (SubscriberHandle, Subscriber) {
    let (inbox_tx, inbox_rx) = mpsc::channel(inbox_capacity.max(1));
    let (done_tx, done_rx) = watch::channel(false);
    (
        SubscriberHandle {
            id: id.clone(),
            inbox: inbox_tx,
            done: done_tx,
        },
        Subscriber {
            id,
            inbox: inbox_rx,
            done: done_rx,
        },
    )
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deliver_and_receive() {
        let (handle, mut subscriber) = subscriber_pair(SubscriberId::from("s1"), 4);
        assert!(handle.deliver(&Notification::new("hello", None)));

        let Some(received) = subscriber.inbox.recv().await else {
            panic!("expected a delivered notification");
        };
        assert_eq!(received.content, "hello");
    }

    #[tokio::test]
    async fn deliver_drops_when_full() {
        let (handle, _subscriber) = subscriber_pair(SubscriberId::from("s1"), 1);
        assert!(handle.deliver(&Notification::new("first", None)));
        assert!(!handle.deliver(&Notification::new("second", None)));
    }

    #[tokio::test]
    async fn close_fires_done_and_shuts_inbox() {
        let (handle, mut subscriber) = subscriber_pair(SubscriberId::from("s1"), 4);
        handle.close();

        let changed = subscriber.done.wait_for(|closed| *closed).await;
        assert!(changed.is_ok());
        assert!(subscriber.inbox.recv().await.is_none());
    }
}
