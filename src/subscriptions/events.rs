use crate::state::notifications::StoreError;
use toast_notifications_util::{CloseReason, NotificationId};

/// Lifecycle events broadcast by a receiver.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Created(NotificationId),
    /// Any in-place change: promise continuation, pause or resume of one record
    Updated(NotificationId),
    Closed {
        id: NotificationId,
        reason: CloseReason,
    },
    /// Every notification was removed at once
    ClearAll { sequence: u64 },
    /// Timers were paused by an interaction
    Suspended,
    /// Timers were rescheduled after an interaction ended
    Resumed,
    /// A push could not be applied
    Rejected {
        id: NotificationId,
        error: StoreError,
    },
}
