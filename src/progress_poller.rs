//! Download progress polling.
//!
//! The subscription only exists while the app asks for it, so dropping it
//! from `App::subscription` is what stops the loop.

use iced::Subscription;
use std::time::Duration;

/// Re-check download progress every `interval`.
pub fn progress_poll_subscription(interval: Duration) -> Subscription<crate::message::Message> {
    iced::time::every(interval).map(|_| crate::message::Message::PollProgress)
}
