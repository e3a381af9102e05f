use crate::{Lifetime, NotificationKind};
use serde::{Deserialize, Serialize};

/// Default visible lifetime for every kind except `promise`.
pub const DEFAULT_DURATION: Lifetime = Lifetime::from_millis(6000);

/// Politeness of screen reader announcements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaLive {
    #[default]
    Polite,
    Assertive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaRole {
    #[default]
    Status,
    Alert,
}

/// A partial set of notification fields.
///
/// Used for receiver-level defaults as well as for the fields carried by a
/// push request. `None` means "not set at this layer".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationOptions {
    pub title: Option<String>,
    pub message: Option<String>,
    pub duration: Option<Lifetime>,
    pub aria_live: Option<AriaLive>,
    pub aria_role: Option<AriaRole>,
}

impl NotificationOptions {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn duration(mut self, duration: impl Into<Lifetime>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn aria_live(mut self, aria_live: AriaLive) -> Self {
        self.aria_live = Some(aria_live);
        self
    }

    pub fn aria_role(mut self, aria_role: AriaRole) -> Self {
        self.aria_role = Some(aria_role);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fully merged notification fields, as stored on a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOptions {
    pub title: String,
    pub message: String,
    pub duration: Lifetime,
    pub aria_live: AriaLive,
    pub aria_role: AriaRole,
}

impl ResolvedOptions {
    /// Built-in defaults for a kind, the lowest precedence layer of the merge.
    pub fn builtin(kind: NotificationKind) -> Self {
        let (aria_live, aria_role) = match kind {
            NotificationKind::Error
            | NotificationKind::Warning
            | NotificationKind::PromiseError => (AriaLive::Assertive, AriaRole::Alert),
            _ => (AriaLive::Polite, AriaRole::Status),
        };

        let duration = match kind {
            NotificationKind::Promise | NotificationKind::PromiseResolving => Lifetime::Infinite,
            _ => DEFAULT_DURATION,
        };

        Self {
            title: String::new(),
            message: String::new(),
            duration,
            aria_live,
            aria_role,
        }
    }

    /// Overwrite every field that `layer` sets.
    pub fn apply(&mut self, layer: &NotificationOptions) {
        if let Some(title) = &layer.title {
            self.title.clone_from(title);
        }
        if let Some(message) = &layer.message {
            self.message.clone_from(message);
        }
        if let Some(duration) = layer.duration {
            self.duration = duration;
        }
        if let Some(aria_live) = layer.aria_live {
            self.aria_live = aria_live;
        }
        if let Some(aria_role) = layer.aria_role {
            self.aria_role = aria_role;
        }
    }

    /// Merge layers from lowest to highest precedence on top of the built-in
    /// defaults for `kind`. The initial promise state is always infinite.
    pub fn merge<'a>(
        kind: NotificationKind,
        layers: impl IntoIterator<Item = &'a NotificationOptions>,
    ) -> Self {
        let mut merged = Self::builtin(kind);
        for layer in layers {
            merged.apply(layer);
        }
        if kind.is_promise() {
            merged.duration = Lifetime::Infinite;
        }
        merged
    }
}

/// Opaque custom render association: a component name and its props.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSpec {
    pub component: Option<String>,
    pub props: Option<serde_json::Value>,
}

impl RenderSpec {
    pub fn is_empty(&self) -> bool {
        self.component.is_none() && self.props.is_none()
    }

    /// Fill the fields this render association leaves unset from `previous`.
    pub fn or_previous(self, previous: &RenderSpec) -> RenderSpec {
        RenderSpec {
            component: self.component.or_else(|| previous.component.clone()),
            props: self.props.or_else(|| previous.props.clone()),
        }
    }
}
