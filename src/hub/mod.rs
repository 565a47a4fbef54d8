//! The notification hub: subscriber registry and broadcast fan-out.
//!
//! [`Hub`] is a cheap cloneable handle over a command channel. Exactly one
//! spawned control-loop task owns the registry of live subscribers and
//! applies register/unregister/broadcast requests in arrival order, so
//! membership mutation needs no locking. Broadcast delivery into each
//! subscriber's bounded inbox is non-blocking: a full inbox drops the
//! event for that subscriber only, and the publisher is never slowed by a
//! lagging consumer.

mod command;
mod registry;
pub mod subscriber;

pub use subscriber::{Subscriber, SubscriberHandle, subscriber_pair};

use tokio::sync::{mpsc, oneshot};

use crate::domain::{Notification, SubscriberId};

use command::HubCommand;
use registry::Registry;

/// Handle to the hub control loop.
///
/// All operations enqueue a request and return immediately; the effect is
/// applied by the control loop before it picks up any later request.
#[derive(Debug, Clone)]
pub struct Hub {
    commands: mpsc::UnboundedSender<HubCommand>,
}

impl Hub {
    /// Spawns the control loop and returns a handle to it.
    ///
    /// The loop runs until every `Hub` clone has been dropped.
    #[must_use]
    pub fn spawn() -> Self {
        let (commands, mailbox) = mpsc::unbounded_channel();
        tokio::spawn(control_loop(mailbox));
        Self { commands }
    }

    /// Adds a subscriber to the registry.
    ///
    /// Subsequent broadcasts are visible to it. Registering an id that is
    /// already live closes the previous entry and replaces it.
    pub fn register(&self, handle: SubscriberHandle) {
        let _ = self.commands.send(HubCommand::Register(handle));
    }

    /// Removes a subscriber, fires its done-signal, and releases its
    /// inbox. Idempotent: unknown ids are ignored.
    pub fn unregister(&self, id: SubscriberId) {
        let _ = self.commands.send(HubCommand::Unregister(id));
    }

    /// Offers an event to every currently registered subscriber.
    ///
    /// Fire-and-forget: returns once the event is in the control loop's
    /// mailbox. Subscribers with a full inbox miss this event.
    pub fn broadcast(&self, notification: Notification) {
        let _ = self.commands.send(HubCommand::Broadcast(notification));
    }

    /// Returns the number of live subscribers.
    ///
    /// Answered by the control loop after every earlier request has been
    /// applied, so this also serves as an ordering barrier in tests.
    pub async fn subscriber_count(&self) -> usize {
        let (reply, response) = oneshot::channel();
        if self
            .commands
            .send(HubCommand::SubscriberCount(reply))
            .is_err()
        {
            return 0;
        }
        response.await.unwrap_or(0)
    }
}

/// The single task permitted to touch the registry.
async fn control_loop(mut mailbox: mpsc::UnboundedReceiver<HubCommand>) {
    let mut registry = Registry::new();

    while let Some(command) = mailbox.recv().await {
        match command {
            HubCommand::Register(handle) => {
                let id = handle.id().clone();
                if let Some(displaced) = registry.insert(handle) {
                    tracing::debug!(subscriber = %id, "displacing previous subscriber with same id");
                    displaced.close();
                }
                tracing::info!(subscriber = %id, total = registry.len(), "subscriber connected");
            }
            HubCommand::Unregister(id) => {
                if let Some(handle) = registry.remove(&id) {
                    handle.close();
                    tracing::info!(subscriber = %id, total = registry.len(), "subscriber disconnected");
                }
            }
            HubCommand::Broadcast(notification) => {
                let outcome = registry.broadcast(&notification);
                tracing::debug!(
                    event = %notification.id,
                    delivered = outcome.delivered,
                    dropped = outcome.dropped,
                    "broadcast"
                );
            }
            HubCommand::SubscriberCount(reply) => {
                let _ = reply.send(registry.len());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn event(id: &str, content: &str) -> Notification {
        let mut notification = Notification::new(content, None);
        notification.id = id.to_string();
        notification
    }

    fn register(hub: &Hub, id: &str, capacity: usize) -> Subscriber {
        let (handle, subscriber) = subscriber_pair(SubscriberId::from(id), capacity);
        hub.register(handle);
        subscriber
    }

    #[tokio::test]
    async fn membership_tracks_register_and_unregister() {
        let hub = Hub::spawn();
        let _s1 = register(&hub, "s1", 4);
        let _s2 = register(&hub, "s2", 4);
        assert_eq!(hub.subscriber_count().await, 2);

        hub.unregister(SubscriberId::from("s1"));
        assert_eq!(hub.subscriber_count().await, 1);

        // Unregistering again is a no-op, not an error.
        hub.unregister(SubscriberId::from("s1"));
        hub.unregister(SubscriberId::from("never-registered"));
        assert_eq!(hub.subscriber_count().await, 1);
    }

    #[tokio::test]
    async fn broadcast_reaches_single_subscriber_exactly_once() {
        let hub = Hub::spawn();
        let mut s1 = register(&hub, "s1", 4);

        hub.broadcast(event("e1", "hello"));
        let Some(received) = s1.inbox.recv().await else {
            panic!("s1 should receive e1");
        };
        assert_eq!(received.id, "e1");
        assert_eq!(received.content, "hello");

        hub.unregister(SubscriberId::from("s1"));
        hub.broadcast(event("e2", "bye"));
        assert_eq!(hub.subscriber_count().await, 0);

        // The inbox closes without ever seeing e2.
        assert!(s1.inbox.recv().await.is_none());
    }

    #[tokio::test]
    async fn broadcast_reaches_all_then_respects_unregister() {
        let hub = Hub::spawn();
        let mut s1 = register(&hub, "s1", 4);
        let mut s2 = register(&hub, "s2", 4);

        hub.broadcast(event("e1", "first"));
        let (got1, got2) = (s1.inbox.recv().await, s2.inbox.recv().await);
        match (got1, got2) {
            (Some(a), Some(b)) => {
                assert_eq!(a.id, "e1");
                assert_eq!(b.id, "e1");
            }
            _ => panic!("both subscribers should receive e1"),
        }

        hub.unregister(SubscriberId::from("s1"));
        hub.broadcast(event("e2", "second"));

        let Some(received) = s2.inbox.recv().await else {
            panic!("s2 should receive e2");
        };
        assert_eq!(received.id, "e2");
        assert!(s1.inbox.recv().await.is_none());
    }

    #[tokio::test]
    async fn full_inbox_drops_without_blocking() {
        let hub = Hub::spawn();
        let capacity = 4;
        let mut flooded = register(&hub, "flooded", capacity);
        let mut healthy = register(&hub, "healthy", capacity * 2);

        for i in 0..=capacity {
            hub.broadcast(event(&format!("e{i}"), "flood"));
        }
        // Barrier: every broadcast above has been applied.
        assert_eq!(hub.subscriber_count().await, 2);

        let mut flooded_got = 0;
        while flooded.inbox.try_recv().is_ok() {
            flooded_got += 1;
        }
        assert_eq!(flooded_got, capacity);

        let mut healthy_got = 0;
        while healthy.inbox.try_recv().is_ok() {
            healthy_got += 1;
        }
        assert_eq!(healthy_got, capacity + 1);
    }

    #[tokio::test]
    async fn accepted_events_keep_publish_order() {
        let hub = Hub::spawn();
        let mut s1 = register(&hub, "s1", 16);

        for i in 0..10 {
            hub.broadcast(event(&format!("e{i}"), "ordered"));
        }
        assert_eq!(hub.subscriber_count().await, 1);

        for i in 0..10 {
            let Some(received) = s1.inbox.recv().await else {
                panic!("missing event e{i}");
            };
            assert_eq!(received.id, format!("e{i}"));
        }
    }

    #[tokio::test]
    async fn unregister_fires_done_signal() {
        let hub = Hub::spawn();
        let mut s1 = register(&hub, "s1", 4);
        assert_eq!(hub.subscriber_count().await, 1);

        hub.unregister(SubscriberId::from("s1"));
        let fired = s1.done.wait_for(|closed| *closed).await;
        assert!(fired.is_ok());
    }

    #[tokio::test]
    async fn reregistering_same_id_displaces_old_subscriber() {
        let hub = Hub::spawn();
        let mut old = register(&hub, "s1", 4);
        let mut new = register(&hub, "s1", 4);
        assert_eq!(hub.subscriber_count().await, 1);

        hub.broadcast(event("e1", "hello"));
        let Some(received) = new.inbox.recv().await else {
            panic!("replacement subscriber should receive e1");
        };
        assert_eq!(received.id, "e1");
        assert!(old.inbox.recv().await.is_none());
    }
}
