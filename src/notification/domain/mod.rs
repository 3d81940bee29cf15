//! Domain model for task notifications.

mod ids;
mod notification;

pub use ids::NotificationId;
pub use notification::{Notification, PersistedNotificationData};
