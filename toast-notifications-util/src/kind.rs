use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of notification kinds.
///
/// The `Promise*` variants model one async operation whose notification morphs
/// across states while keeping the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
    /// Initial state of an async operation. Never auto-dismissed.
    Promise,
    /// Intermediate progress update of a promise notification.
    PromiseResolving,
    PromiseSuccess,
    PromiseError,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 8] = [
        NotificationKind::Success,
        NotificationKind::Error,
        NotificationKind::Warning,
        NotificationKind::Info,
        NotificationKind::Promise,
        NotificationKind::PromiseResolving,
        NotificationKind::PromiseSuccess,
        NotificationKind::PromiseError,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
            NotificationKind::Promise => "promise",
            NotificationKind::PromiseResolving => "promise-resolving",
            NotificationKind::PromiseSuccess => "promise-success",
            NotificationKind::PromiseError => "promise-error",
        }
    }

    /// Parse a kind name, falling back to [`NotificationKind::Info`] for
    /// anything outside the closed set.
    pub fn parse_lossy(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .unwrap_or_else(|| {
                tracing::warn!("Unknown notification type '{}', using info", name);
                NotificationKind::Info
            })
    }

    /// The literal initial promise state.
    pub fn is_promise(&self) -> bool {
        matches!(self, NotificationKind::Promise)
    }

    /// A state that continues an existing promise notification.
    pub fn is_promise_continuation(&self) -> bool {
        matches!(
            self,
            NotificationKind::PromiseResolving
                | NotificationKind::PromiseSuccess
                | NotificationKind::PromiseError
        )
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for NotificationKind {
    fn from(value: &str) -> Self {
        Self::parse_lossy(value)
    }
}

impl From<String> for NotificationKind {
    fn from(value: String) -> Self {
        Self::parse_lossy(&value)
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in NotificationKind::ALL {
            assert_eq!(NotificationKind::parse_lossy(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_unknown_kind_degrades_to_info() {
        assert_eq!(NotificationKind::from("fatal"), NotificationKind::Info);
        assert_eq!(NotificationKind::from(""), NotificationKind::Info);
        assert_eq!(NotificationKind::from("Success"), NotificationKind::Info);
    }

    #[test]
    fn test_promise_classification() {
        assert!(NotificationKind::Promise.is_promise());
        assert!(!NotificationKind::Promise.is_promise_continuation());

        assert!(NotificationKind::PromiseSuccess.is_promise_continuation());
        assert!(NotificationKind::PromiseError.is_promise_continuation());
        assert!(NotificationKind::PromiseResolving.is_promise_continuation());
        assert!(!NotificationKind::PromiseSuccess.is_promise());

        assert!(!NotificationKind::Success.is_promise_continuation());
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&NotificationKind::PromiseError).unwrap();
        assert_eq!(json, "\"promise-error\"");

        let kind: NotificationKind = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(kind, NotificationKind::Warning);

        let kind: NotificationKind = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(kind, NotificationKind::Info);
    }
}
