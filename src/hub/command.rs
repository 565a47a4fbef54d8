//! Requests accepted by the hub control loop.

use tokio::sync::oneshot;

use crate::domain::{Notification, SubscriberId};

use super::subscriber::SubscriberHandle;

/// A single request into the control loop's mailbox.
///
/// Requests are processed strictly in arrival order; senders never wait
/// for the effect to be applied.
#[derive(Debug)]
pub(crate) enum HubCommand {
    /// Add a subscriber to the registry.
    Register(SubscriberHandle),
    /// Remove a subscriber, firing its done-signal. Idempotent.
    Unregister(SubscriberId),
    /// Offer an event to every registered subscriber.
    Broadcast(Notification),
    /// Report the number of live subscribers.
    SubscriberCount(oneshot::Sender<usize>),
}
