use crate::timer::TimerToken;
use toast_notifications_config::ReceiverConfig;
use toast_notifications_util::{NotificationId, PushRequest};

/// Where an interaction with the notifications came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionSource {
    /// Pointer entering / leaving the notification area
    Hover,
    /// Touch or swipe gesture starting / being released
    Touch,
}

/// Receiver message types
#[derive(Debug, Clone)]
pub enum Message {
    /// New notification, or continuation of a promise notification
    Push(PushRequest),
    /// Dismissal timer fired
    Expired { id: NotificationId, token: TimerToken },
    /// Notification dismissed by the user or its renderer
    Clear(NotificationId),
    /// Notification removed immediately
    Destroy(NotificationId),
    /// Remove every notification
    ClearAll,
    /// Interaction began over the notifications
    InteractionStart(InteractionSource),
    /// Interaction ended
    InteractionEnd(InteractionSource),
    /// Accept new notifications
    Enable,
    /// Stop accepting new notifications
    Disable,
    /// Configuration updated
    Config(ReceiverConfig),
}
