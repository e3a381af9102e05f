use crate::constants::*;
use crate::handlers::{Dispatched, InteractionController, Message, PushDispatcher};
use crate::state::notifications::{NotificationStore, StoreSnapshot};
use crate::subscriptions::events::Event;
use crate::subscriptions::notifier::{ClearHandle, Notifier};
use crate::timer::{TimerToken, TokioScheduler};
use std::sync::Arc;
use toast_notifications_config::ReceiverConfig;
use toast_notifications_util::{CloseReason, NotificationId, PushRequest};
use tokio::sync::{
    mpsc::{self, WeakSender},
    watch,
};

/// Create a receiver and the notifier that feeds it.
///
/// The receiver does nothing until [`Receiver::run`] is polled, or its queue is
/// drained by hand with [`Receiver::drain`].
pub fn receiver(name: &str, config: ReceiverConfig) -> (Receiver, Notifier) {
    let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
    let name: Arc<str> = Arc::from(name);

    let store = NotificationStore::new(config.insert_at);
    let notifier = Notifier::new(name.clone(), tx.clone(), store.subscribe(), store.event_sender());
    let weak_tx = tx.downgrade();

    let receiver = Receiver {
        name,
        store,
        interaction: InteractionController::new(&config),
        dispatcher: PushDispatcher::new(config),
        scheduler: TokioScheduler::new(weak_tx.clone()),
        rx,
        weak_tx,
    };

    (receiver, notifier)
}

/// Owns one notification collection and applies every operation on it, one
/// message at a time.
pub struct Receiver {
    name: Arc<str>,
    store: NotificationStore,
    dispatcher: PushDispatcher,
    interaction: InteractionController,
    scheduler: TokioScheduler,
    rx: mpsc::Receiver<Message>,
    weak_tx: WeakSender<Message>,
}

impl Receiver {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.store.subscribe()
    }

    pub fn is_enabled(&self) -> bool {
        self.dispatcher.is_enabled()
    }

    pub fn is_suspended(&self) -> bool {
        self.interaction.is_suspended()
    }

    /// Apply messages until every notifier and clear handle is dropped.
    pub async fn run(mut self) {
        tracing::debug!("Receiver {} started", self.name);
        while let Some(message) = self.rx.recv().await {
            self.update(message);
        }
        tracing::debug!("Receiver {} stopped", self.name);
    }

    /// Apply every message already queued. Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.update(message);
            applied += 1;
        }
        applied
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::Push(request) => {
                self.push(request);
            }
            Message::Expired { id, token } => {
                self.expire(id, token);
            }
            Message::Clear(id) => {
                self.store.remove(&id, CloseReason::Cleared);
            }
            Message::Destroy(id) => {
                self.store.remove(&id, CloseReason::Destroyed);
            }
            Message::ClearAll => {
                let removed = self.store.destroy_all();
                tracing::debug!("Cleared {} notifications from {}", removed, self.name);
            }
            Message::InteractionStart(source) => {
                if self.interaction.suspend(source, &mut self.store) {
                    self.store.emit(Event::Suspended);
                }
            }
            Message::InteractionEnd(source) => {
                if self
                    .interaction
                    .resume(source, &mut self.store, &mut self.scheduler)
                {
                    self.store.emit(Event::Resumed);
                }
            }
            Message::Enable => {
                self.dispatcher.set_enabled(true);
            }
            Message::Disable => {
                self.dispatcher.set_enabled(false);
            }
            Message::Config(config) => {
                self.set_config(config);
            }
        }

        if self.interaction.reset_if_empty(&self.store) {
            tracing::trace!("Receiver {} emptied while suspended", self.name);
        }
    }

    fn push(&mut self, request: PushRequest) {
        let clear = ClearHandle::new(request.id.clone(), self.weak_tx.clone());
        let suspended = self.interaction.is_suspended();

        match self.dispatcher.dispatch(
            request,
            &mut self.store,
            &mut self.scheduler,
            suspended,
            clear,
        ) {
            Ok(Dispatched::Created(id)) | Ok(Dispatched::Continued(id)) => {
                tracing::trace!("{} applied push {}", self.name, id);
            }
            Ok(Dispatched::Dropped(_)) => {}
            Err(err) => {
                tracing::error!("{} rejected push: {}", self.name, err);
                self.store.emit(Event::Rejected {
                    id: err.id().clone(),
                    error: err,
                });
            }
        }
    }

    fn expire(&mut self, id: NotificationId, token: TimerToken) {
        let live = self.store.get(&id).and_then(|n| n.timer_token());
        if live != Some(token) {
            tracing::trace!("Ignoring stale expiry of {}", id);
            return;
        }
        self.store.remove(&id, CloseReason::Expired);
    }

    fn set_config(&mut self, config: ReceiverConfig) {
        tracing::debug!("Receiver {} config updated", self.name);
        self.store.set_insert_at(config.insert_at);
        self.interaction.set_config(&config);
        self.dispatcher.set_config(config);
    }
}
