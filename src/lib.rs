//! Toast notification lifecycle engine.
//!
//! A [`Receiver`] owns one ordered collection of notifications and applies
//! every operation on it from a single task. Producers talk to it through a
//! cloneable [`Notifier`]; renderers watch [`StoreSnapshot`]s and lifecycle
//! [`Event`]s.

pub mod app;
mod constants;
pub mod handlers;
pub mod state;
pub mod subscriptions;
pub mod timer;

pub use app::{Receiver, receiver};
pub use handlers::{InteractionSource, Message};
pub use state::{NotificationView, StoreError, StoreSnapshot};
pub use subscriptions::{ClearHandle, Event, Notifier, PromiseHandle, Receivers};

pub use toast_notifications_config::{ConfigError, InsertAt, NotificationDefaults, ReceiverConfig};
pub use toast_notifications_util::{
    AriaLive, AriaRole, CloseReason, Lifetime, NotificationId, NotificationKind,
    NotificationOptions, PushRequest, RenderSpec, ResolvedOptions,
};
