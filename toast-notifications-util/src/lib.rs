pub mod kind;
pub mod lifetime;
pub mod options;
pub mod timing;

pub use kind::NotificationKind;
pub use lifetime::Lifetime;
pub use options::{
    AriaLive, AriaRole, DEFAULT_DURATION, NotificationOptions, RenderSpec, ResolvedOptions,
};
pub use timing::{RESUME_GRACE, elapsed_at_pause, remaining_on_resume};

use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

/// Opaque notification identifier.
///
/// Generated ids are unique for the lifetime of the process. Callers may also
/// supply their own ids, in which case uniqueness among visible notifications
/// is their responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Arc<str>);

impl NotificationId {
    pub fn generate() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(Arc::from(format!("n{:x}", n)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for NotificationId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

/// Why a notification left the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloseReason {
    /// The dismissal timer fired.
    Expired,
    /// The user or renderer dismissed it.
    Cleared,
    /// Removed immediately, without an exit animation.
    Destroyed,
    /// Pushed out by the visible-count limit.
    Evicted,
    /// Removed as part of a clear-all.
    ClearedAll,
}

/// An inbound push, as produced by the push entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    #[serde(default = "NotificationId::generate")]
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default, flatten)]
    pub options: NotificationOptions,
    #[serde(default)]
    pub render: RenderSpec,
}

impl PushRequest {
    pub fn new(kind: NotificationKind, options: NotificationOptions) -> Self {
        Self {
            id: NotificationId::generate(),
            kind,
            options,
            render: RenderSpec::default(),
        }
    }

    /// Continue the notification with `id` in a new state.
    pub fn continuation(
        id: NotificationId,
        kind: NotificationKind,
        options: NotificationOptions,
    ) -> Self {
        Self {
            id,
            kind,
            options,
            render: RenderSpec::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<NotificationId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_render(mut self, render: RenderSpec) -> Self {
        self.render = render;
        self
    }
}
