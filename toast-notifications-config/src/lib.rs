use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};
use toast_notifications_util::{NotificationKind, NotificationOptions};

/// Which end of the collection new notifications are inserted at.
///
/// Eviction always happens at the opposite end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertAt {
    /// Newest first.
    #[default]
    Front,
    /// Newest last.
    Back,
}

/// Receiver-level defaults, one layer per kind plus a global layer.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationDefaults {
    /// Applied to every kind, after the per-kind layer.
    pub global: NotificationOptions,
    pub success: NotificationOptions,
    pub error: NotificationOptions,
    pub warning: NotificationOptions,
    pub info: NotificationOptions,
    pub promise: NotificationOptions,
    #[serde(rename = "promise-resolving")]
    pub promise_resolving: NotificationOptions,
    #[serde(rename = "promise-success")]
    pub promise_success: NotificationOptions,
    #[serde(rename = "promise-error")]
    pub promise_error: NotificationOptions,
}

impl NotificationDefaults {
    pub fn for_kind(&self, kind: NotificationKind) -> &NotificationOptions {
        match kind {
            NotificationKind::Success => &self.success,
            NotificationKind::Error => &self.error,
            NotificationKind::Warning => &self.warning,
            NotificationKind::Info => &self.info,
            NotificationKind::Promise => &self.promise,
            NotificationKind::PromiseResolving => &self.promise_resolving,
            NotificationKind::PromiseSuccess => &self.promise_success,
            NotificationKind::PromiseError => &self.promise_error,
        }
    }

    pub fn for_kind_mut(&mut self, kind: NotificationKind) -> &mut NotificationOptions {
        match kind {
            NotificationKind::Success => &mut self.success,
            NotificationKind::Error => &mut self.error,
            NotificationKind::Warning => &mut self.warning,
            NotificationKind::Info => &mut self.info,
            NotificationKind::Promise => &mut self.promise,
            NotificationKind::PromiseResolving => &mut self.promise_resolving,
            NotificationKind::PromiseSuccess => &mut self.promise_success,
            NotificationKind::PromiseError => &mut self.promise_error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// Whether new notifications are accepted at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// The maximum number of notifications that can be displayed at once.
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub insert_at: InsertAt,
    /// Count the limit per notification kind instead of over all notifications.
    #[serde(default)]
    pub limit_is_per_type: bool,
    /// Pause dismissal timers while a pointer hovers the notifications.
    #[serde(default = "default_true")]
    pub pause_on_hover: bool,
    /// Pause dismissal timers while a touch interaction is in progress.
    #[serde(default = "default_true")]
    pub pause_on_touch: bool,
    #[serde(default)]
    pub notifications: NotificationDefaults,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            limit: default_limit(),
            insert_at: InsertAt::default(),
            limit_is_per_type: false,
            pause_on_hover: default_true(),
            pause_on_touch: default_true(),
            notifications: NotificationDefaults::default(),
        }
    }
}

impl ReceiverConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read
    Io(String, String),
    /// The config contents are not valid
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Failed to read config {}: {}", path, e),
            ConfigError::Parse(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// Default value helpers for serde
const fn default_true() -> bool {
    true
}

const fn default_limit() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use toast_notifications_util::Lifetime;

    #[test]
    fn test_config_defaults() {
        let config = ReceiverConfig::default();

        assert!(config.enabled);
        assert_eq!(config.limit, 10);
        assert_eq!(config.insert_at, InsertAt::Front);
        assert!(!config.limit_is_per_type);
        assert!(config.pause_on_hover);
        assert!(config.pause_on_touch);
        assert!(config.notifications.global.is_empty());
    }

    #[test]
    fn test_config_deserialization_with_defaults() {
        let config = ReceiverConfig::from_json(r#"{ "limit": 3 }"#).unwrap();

        assert_eq!(config.limit, 3);
        assert!(config.enabled);
        assert!(config.pause_on_hover);
        assert_eq!(config.insert_at, InsertAt::Front);
    }

    #[test]
    fn test_config_deserialization_full() {
        let json = r#"{
            "enabled": false,
            "limit": 5,
            "insert_at": "back",
            "limit_is_per_type": true,
            "pause_on_hover": false,
            "pause_on_touch": true,
            "notifications": {
                "global": { "duration": 4000 },
                "error": { "title": "Error", "duration": "infinite" },
                "promise-success": { "title": "Done" }
            }
        }"#;

        let config = ReceiverConfig::from_json(json).unwrap();

        assert!(!config.enabled);
        assert_eq!(config.limit, 5);
        assert_eq!(config.insert_at, InsertAt::Back);
        assert!(config.limit_is_per_type);
        assert!(!config.pause_on_hover);
        assert_eq!(
            config.notifications.global.duration,
            Some(Lifetime::from_millis(4000))
        );
        assert_eq!(
            config.notifications.for_kind(NotificationKind::Error).duration,
            Some(Lifetime::Infinite)
        );
        assert_eq!(
            config
                .notifications
                .for_kind(NotificationKind::PromiseSuccess)
                .title
                .as_deref(),
            Some("Done")
        );
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = ReceiverConfig::default();
        config.insert_at = InsertAt::Back;
        config
            .notifications
            .for_kind_mut(NotificationKind::Warning)
            .title = Some("Careful".to_string());

        let json = config.to_json().unwrap();
        assert!(json.contains("insert_at"));
        assert!(json.contains("Careful"));

        assert_eq!(ReceiverConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_config_invalid() {
        let err = ReceiverConfig::from_json(r#"{ "limit": "many" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Invalid config"));
    }

    #[test]
    fn test_config_missing_file() {
        let err = ReceiverConfig::load(Path::new("/nonexistent/toast.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_default_helpers() {
        assert!(default_true());
        assert_eq!(default_limit(), 10);
    }
}
