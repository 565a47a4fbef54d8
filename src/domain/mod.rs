//! Domain layer: the notification event type and subscriber identity.

pub mod notification;
pub mod subscriber_id;

pub use notification::Notification;
pub use subscriber_id::SubscriberId;
