use crate::handlers::messages::{InteractionSource, Message};
use crate::state::notifications::StoreSnapshot;
use crate::subscriptions::events::Event;
use std::{fmt, sync::Arc};
use toast_notifications_config::ReceiverConfig;
use toast_notifications_util::{NotificationId, NotificationKind, NotificationOptions, PushRequest};
use tokio::sync::{
    broadcast,
    mpsc::{Sender, WeakSender, error::TrySendError},
    watch,
};

/// Dismiss action bound to one notification, handed to renderers.
///
/// Holds a weak sender, so a renderer keeping a view around does not keep
/// the receiver alive.
#[derive(Clone)]
pub struct ClearHandle {
    id: NotificationId,
    tx: WeakSender<Message>,
}

impl ClearHandle {
    pub(crate) fn new(id: NotificationId, tx: WeakSender<Message>) -> Self {
        Self { id, tx }
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    /// Dismiss with an exit animation. A no-op once the record is gone.
    pub fn clear(&self) {
        self.send(Message::Clear(self.id.clone()));
    }

    /// Remove immediately.
    pub fn destroy(&self) {
        self.send(Message::Destroy(self.id.clone()));
    }

    fn send(&self, message: Message) {
        let Some(tx) = self.tx.upgrade() else {
            tracing::trace!("Receiver for {} is gone", self.id);
            return;
        };
        if let Err(err) = tx.try_send(message) {
            tracing::error!("Failed to dismiss notification {}: {}", self.id, err);
        }
    }

    /// A handle whose receiver no longer exists.
    #[cfg(test)]
    pub(crate) fn detached(id: NotificationId) -> Self {
        let (tx, _rx) = tokio::sync::mpsc::channel(1);
        Self::new(id, tx.downgrade())
    }
}

impl fmt::Debug for ClearHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClearHandle").field("id", &self.id).finish()
    }
}

/// Push entry point of one receiver.
///
/// Cheap to clone. Every operation is a message into the receiver's queue, so
/// calls made from many tasks are applied one at a time in arrival order.
#[derive(Clone)]
pub struct Notifier {
    name: Arc<str>,
    tx: Sender<Message>,
    snapshot: watch::Receiver<StoreSnapshot>,
    events: broadcast::Sender<Event>,
}

impl Notifier {
    pub(crate) fn new(
        name: Arc<str>,
        tx: Sender<Message>,
        snapshot: watch::Receiver<StoreSnapshot>,
        events: broadcast::Sender<Event>,
    ) -> Self {
        Self {
            name,
            tx,
            snapshot,
            events,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue a push and return the id it will be stored under.
    pub fn push(&self, request: PushRequest) -> NotificationId {
        let id = request.id.clone();
        self.send(Message::Push(request));
        id
    }

    pub fn success(&self, options: NotificationOptions) -> NotificationId {
        self.push(PushRequest::new(NotificationKind::Success, options))
    }

    pub fn error(&self, options: NotificationOptions) -> NotificationId {
        self.push(PushRequest::new(NotificationKind::Error, options))
    }

    pub fn warning(&self, options: NotificationOptions) -> NotificationId {
        self.push(PushRequest::new(NotificationKind::Warning, options))
    }

    pub fn info(&self, options: NotificationOptions) -> NotificationId {
        self.push(PushRequest::new(NotificationKind::Info, options))
    }

    /// Push a notification in the initial promise state and return a handle
    /// to move it through its later states.
    pub fn promise(&self, options: NotificationOptions) -> PromiseHandle {
        let id = self.push(PushRequest::new(NotificationKind::Promise, options));
        PromiseHandle {
            id,
            notifier: self.clone(),
        }
    }

    pub fn clear(&self, id: NotificationId) {
        self.send(Message::Clear(id));
    }

    pub fn destroy(&self, id: NotificationId) {
        self.send(Message::Destroy(id));
    }

    pub fn clear_all(&self) {
        self.send(Message::ClearAll);
    }

    pub fn enable(&self) {
        self.send(Message::Enable);
    }

    pub fn disable(&self) {
        self.send(Message::Disable);
    }

    /// Report that the user started interacting with the notification area.
    pub fn interaction_start(&self, source: InteractionSource) {
        self.send(Message::InteractionStart(source));
    }

    pub fn interaction_end(&self, source: InteractionSource) {
        self.send(Message::InteractionEnd(source));
    }

    /// Replace the receiver configuration for subsequent operations.
    pub fn set_config(&self, config: ReceiverConfig) {
        self.send(Message::Config(config));
    }

    /// Watch the ordered collection.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.snapshot.clone()
    }

    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// The collection as last published.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.snapshot.borrow().clone()
    }

    fn send(&self, message: Message) {
        match self.tx.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(message)) => {
                tracing::error!(
                    "Notification queue of {} is full, dropping {:?}",
                    self.name,
                    message
                );
            }
            Err(TrySendError::Closed(_)) => {
                tracing::error!("Receiver {} is closed", self.name);
            }
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier").field("name", &self.name).finish()
    }
}

/// A notification created in the promise state.
#[derive(Debug, Clone)]
pub struct PromiseHandle {
    id: NotificationId,
    notifier: Notifier,
}

impl PromiseHandle {
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    /// Report progress. The notification stays until resolved or rejected.
    pub fn update(&self, options: NotificationOptions) {
        self.continue_as(NotificationKind::PromiseResolving, options);
    }

    pub fn resolve(&self, options: NotificationOptions) {
        self.continue_as(NotificationKind::PromiseSuccess, options);
    }

    pub fn reject(&self, options: NotificationOptions) {
        self.continue_as(NotificationKind::PromiseError, options);
    }

    pub fn clear(&self) {
        self.notifier.clear(self.id.clone());
    }

    pub fn destroy(&self) {
        self.notifier.destroy(self.id.clone());
    }

    fn continue_as(&self, kind: NotificationKind, options: NotificationOptions) {
        self.notifier
            .push(PushRequest::continuation(self.id.clone(), kind, options));
    }
}
