//! Application services for notification fan-out and the inbox.

mod fanout;
mod inbox;

pub use fanout::{FanOutError, FanOutResult, NotificationFanOut};
pub use inbox::{NotificationInbox, NotificationInboxError, NotificationInboxResult};
