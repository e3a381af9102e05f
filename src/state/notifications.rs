use crate::constants::*;
use crate::state::record::NotificationRecord;
use crate::subscriptions::events::Event;
use crate::subscriptions::notifier::ClearHandle;
use std::{fmt, sync::Arc};
use toast_notifications_config::InsertAt;
use toast_notifications_util::{
    CloseReason, NotificationId, NotificationKind, RenderSpec, ResolvedOptions,
};
use tokio::sync::{broadcast, watch};
use tokio::time::Instant;

/// Read-only view of one record, as handed to renderers.
#[derive(Debug, Clone)]
pub struct NotificationView {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub options: ResolvedOptions,
    pub render: RenderSpec,
    pub created_at: Instant,
    pub paused: bool,
    pub clear: ClearHandle,
}

impl From<&NotificationRecord> for NotificationView {
    fn from(record: &NotificationRecord) -> Self {
        Self {
            id: record.id.clone(),
            kind: record.kind,
            options: record.options.clone(),
            render: record.render.clone(),
            created_at: record.created_at,
            paused: record.is_timed() && !record.has_live_timer(),
            clear: record.clear.clone(),
        }
    }
}

/// The ordered collection as last published.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub items: Arc<[NotificationView]>,
    /// Incremented on every clear-all, for exit animations.
    pub clear_all_sequence: u64,
}

impl StoreSnapshot {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<NotificationId> {
        self.items.iter().map(|n| n.id.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this id is already visible
    DuplicateId(NotificationId),
}

impl StoreError {
    pub fn id(&self) -> &NotificationId {
        match self {
            StoreError::DuplicateId(id) => id,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateId(id) => write!(f, "Notification {} already exists", id),
        }
    }
}

impl std::error::Error for StoreError {}

/// Owns the ordered notification records of one receiver.
///
/// This is the only place records are mutated. Every mutation republishes the
/// snapshot and emits a lifecycle event.
pub struct NotificationStore {
    records: Vec<NotificationRecord>,
    insert_at: InsertAt,
    clear_all_sequence: u64,
    snapshot: watch::Sender<StoreSnapshot>,
    events: broadcast::Sender<Event>,
}

impl NotificationStore {
    pub fn new(insert_at: InsertAt) -> Self {
        let (snapshot, _) = watch::channel(StoreSnapshot::default());
        let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self {
            records: Vec::with_capacity(INITIAL_RECORDS_CAPACITY),
            insert_at,
            clear_all_sequence: 0,
            snapshot,
            events,
        }
    }

    pub fn set_insert_at(&mut self, insert_at: InsertAt) {
        self.insert_at = insert_at;
    }

    pub fn insert_at(&self) -> InsertAt {
        self.insert_at
    }

    /// Subscribe to snapshots of the collection.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.snapshot.subscribe()
    }

    pub(crate) fn event_sender(&self) -> broadcast::Sender<Event> {
        self.events.clone()
    }

    /// Emit an event that did not come from a store mutation.
    pub(crate) fn emit(&self, event: Event) {
        // No subscribers is fine
        _ = self.events.send(event);
    }

    /// Insert a record at the configured end.
    pub fn create(&mut self, record: NotificationRecord) -> Result<(), StoreError> {
        if self.contains(&record.id) {
            return Err(StoreError::DuplicateId(record.id.clone()));
        }

        let id = record.id.clone();
        match self.insert_at {
            InsertAt::Front => self.records.insert(0, record),
            InsertAt::Back => self.records.push(record),
        }

        self.publish();
        self.emit(Event::Created(id));
        Ok(())
    }

    pub fn get(&self, id: &NotificationId) -> Option<&NotificationRecord> {
        self.records.iter().find(|n| n.id == *id)
    }

    pub fn contains(&self, id: &NotificationId) -> bool {
        self.get(id).is_some()
    }

    /// Mutate a record in place. Returns `false` if it no longer exists.
    pub fn update(&mut self, id: &NotificationId, f: impl FnOnce(&mut NotificationRecord)) -> bool {
        let Some(record) = self.records.iter_mut().find(|n| n.id == *id) else {
            tracing::trace!("Update of missing notification {}", id);
            return false;
        };

        f(record);
        self.publish();
        self.emit(Event::Updated(id.clone()));
        true
    }

    /// Remove a record, cancelling its timer.
    pub fn remove(
        &mut self,
        id: &NotificationId,
        reason: CloseReason,
    ) -> Option<NotificationRecord> {
        let Some(pos) = self.records.iter().position(|n| n.id == *id) else {
            tracing::trace!("Removal of missing notification {}", id);
            return None;
        };

        let mut record = self.records.remove(pos);
        record.cancel_timer();

        self.publish();
        self.emit(Event::Closed {
            id: id.clone(),
            reason,
        });
        Some(record)
    }

    /// Replace every record with `transform(record)`, publishing once.
    pub fn update_all(&mut self, transform: impl FnMut(NotificationRecord) -> NotificationRecord) {
        if self.records.is_empty() {
            return;
        }
        self.records = self.records.drain(..).map(transform).collect();
        self.publish();
    }

    /// Remove everything and bump the clear-all sequence.
    ///
    /// Returns how many records were removed.
    pub fn destroy_all(&mut self) -> usize {
        let removed: Vec<NotificationRecord> = self.records.drain(..).collect();
        let count = removed.len();
        self.clear_all_sequence += 1;
        self.publish();

        for mut record in removed {
            record.cancel_timer();
            self.emit(Event::Closed {
                id: record.id.clone(),
                reason: CloseReason::ClearedAll,
            });
        }
        self.emit(Event::ClearAll {
            sequence: self.clear_all_sequence,
        });
        count
    }

    /// The oldest record matching `filter`, searching from the end opposite
    /// to the insertion side.
    pub fn oldest_matching(
        &self,
        filter: impl Fn(&NotificationRecord) -> bool,
    ) -> Option<&NotificationRecord> {
        match self.insert_at {
            InsertAt::Front => self.records.iter().rev().find(|n| filter(*n)),
            InsertAt::Back => self.records.iter().find(|n| filter(*n)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &NotificationRecord> {
        self.records.iter()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn has_items(&self) -> bool {
        !self.records.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear_all_sequence(&self) -> u64 {
        self.clear_all_sequence
    }

    fn publish(&self) {
        let items: Arc<[NotificationView]> =
            self.records.iter().map(NotificationView::from).collect();
        self.snapshot.send_replace(StoreSnapshot {
            items,
            clear_all_sequence: self.clear_all_sequence,
        });
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new(InsertAt::default())
    }
}
