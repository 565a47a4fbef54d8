//! The set of currently live subscribers.
//!
//! Owned exclusively by the hub control loop. No other task reads or
//! writes it; membership changes and broadcast fan-out are serialized by
//! the loop, so no locking is needed here.

use std::collections::HashMap;

use crate::domain::{Notification, SubscriberId};

use super::subscriber::SubscriberHandle;

/// Result of one broadcast pass over the registry.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct BroadcastOutcome {
    /// Subscribers whose inbox accepted the event.
    pub delivered: usize,
    /// Subscribers whose inbox was full or closed; the event was
    /// dropped for them.
    pub dropped: usize,
}

/// Live-subscriber set keyed by [`SubscriberId`].
#[derive(Debug, Default)]
pub(crate) struct Registry {
    subscribers: HashMap<SubscriberId, SubscriberHandle>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a subscriber. If the id is already live, the previous
    /// entry is displaced and returned so the caller can close it
    /// (a reconnect under the same id).
    pub(crate) fn insert(&mut self, handle: SubscriberHandle) -> Option<SubscriberHandle> {
        self.subscribers.insert(handle.id.clone(), handle)
    }

    /// Removes a subscriber if present. Removing an unknown id is a
    /// no-op returning `None`.
    pub(crate) fn remove(&mut self, id: &SubscriberId) -> Option<SubscriberHandle> {
        self.subscribers.remove(id)
    }

    /// Offers the event to every registered subscriber without blocking.
    pub(crate) fn broadcast(&self, notification: &Notification) -> BroadcastOutcome {
        let mut outcome = BroadcastOutcome::default();
        for handle in self.subscribers.values() {
            if handle.deliver(notification) {
                outcome.delivered += 1;
            } else {
                outcome.dropped += 1;
            }
        }
        outcome
    }

    pub(crate) fn len(&self) -> usize {
        self.subscribers.len()
    }
}
