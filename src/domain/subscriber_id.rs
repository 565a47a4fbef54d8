//! Subscriber identity.
//!
//! [`SubscriberId`] is a newtype wrapper around `String` so subscriber
//! identifiers cannot be confused with other strings. Clients may bring
//! their own id via the `client_id` query parameter; generated ids are
//! UUID v4, which stays collision-free under concurrent connects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a connected subscriber.
///
/// Unique within the process at any given time. Used as the key into the
/// hub's registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(String);

impl SubscriberId {
    /// Generates a new random `SubscriberId` (UUID v4).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SubscriberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SubscriberId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
