//! Turns push requests into store mutations.

use crate::state::notifications::{NotificationStore, StoreError};
use crate::state::record::NotificationRecord;
use crate::subscriptions::notifier::ClearHandle;
use crate::timer::Scheduler;
use toast_notifications_config::ReceiverConfig;
use toast_notifications_util::{
    CloseReason, NotificationId, NotificationKind, PushRequest, ResolvedOptions,
};
use tokio::time::Instant;

/// What a push did to the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// A new record was inserted
    Created(NotificationId),
    /// An existing promise record moved to a new state
    Continued(NotificationId),
    /// The dispatcher is disabled and the push was ignored
    Dropped(NotificationId),
}

pub struct PushDispatcher {
    config: ReceiverConfig,
    enabled: bool,
}

impl PushDispatcher {
    pub fn new(config: ReceiverConfig) -> Self {
        let enabled = config.enabled;
        Self { config, enabled }
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    /// Replace the configuration. Applies to subsequent pushes only.
    pub fn set_config(&mut self, config: ReceiverConfig) {
        self.enabled = config.enabled;
        self.config = config;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Merge the defaults chain for `request`: built-in, per-type, global,
    /// then the request itself.
    pub fn resolve(&self, request: &PushRequest) -> ResolvedOptions {
        let defaults = &self.config.notifications;
        ResolvedOptions::merge(
            request.kind,
            [
                defaults.for_kind(request.kind),
                &defaults.global,
                &request.options,
            ],
        )
    }

    /// Apply one push to `store`.
    ///
    /// `suspended` is the interaction state of the surface: while suspended no
    /// timer is started, the interaction controller schedules it on resume.
    pub fn dispatch(
        &mut self,
        request: PushRequest,
        store: &mut NotificationStore,
        scheduler: &mut impl Scheduler,
        suspended: bool,
        clear: ClearHandle,
    ) -> Result<Dispatched, StoreError> {
        let options = self.resolve(&request);
        let now = Instant::now();
        let PushRequest {
            id, kind, render, ..
        } = request;

        if kind.is_promise_continuation() && store.contains(&id) {
            store.update(&id, |record| {
                record.continue_as(kind, options, render, now);
                if !suspended {
                    record.start_timer(&mut *scheduler, now);
                }
            });
            tracing::debug!("Notification {} continued as {}", id, kind);
            return Ok(Dispatched::Continued(id));
        }

        if !self.enabled {
            tracing::debug!("Notifications disabled, dropping {}", id);
            return Ok(Dispatched::Dropped(id));
        }

        if store.contains(&id) {
            return Err(StoreError::DuplicateId(id));
        }

        self.enforce_limit(kind, store);

        let mut record = NotificationRecord::new(id.clone(), kind, options, render, now, clear);
        if !suspended {
            record.start_timer(scheduler, now);
        }
        store.create(record)?;

        tracing::debug!("Notification {} created as {}", id, kind);
        Ok(Dispatched::Created(id))
    }

    /// Make room for one more record of `kind`, evicting the oldest records
    /// that are not in the initial promise state.
    fn enforce_limit(&self, kind: NotificationKind, store: &mut NotificationStore) {
        let limit = self.config.limit;
        if limit == 0 {
            return;
        }

        let per_type = self.config.limit_is_per_type;
        let counted = |record: &NotificationRecord| !per_type || record.kind == kind;

        while store.iter().filter(|n| counted(*n)).count() >= limit {
            let Some(evicted) = store
                .oldest_matching(|n| counted(n) && !n.kind.is_promise())
                .map(|n| n.id.clone())
            else {
                tracing::warn!(
                    "Notification limit {} reached but only promise notifications are visible",
                    limit
                );
                return;
            };

            tracing::debug!("Evicting notification {}", evicted);
            store.remove(&evicted, CloseReason::Evicted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::testing::RecordingScheduler;
    use std::time::Duration;
    use toast_notifications_config::InsertAt;
    use toast_notifications_util::{Lifetime, NotificationOptions, RenderSpec};

    struct Harness {
        dispatcher: PushDispatcher,
        store: NotificationStore,
        scheduler: RecordingScheduler,
    }

    impl Harness {
        fn new(config: ReceiverConfig) -> Self {
            Self {
                store: NotificationStore::new(config.insert_at),
                dispatcher: PushDispatcher::new(config),
                scheduler: RecordingScheduler::default(),
            }
        }

        fn limited(limit: usize, insert_at: InsertAt) -> Self {
            Self::new(ReceiverConfig {
                limit,
                insert_at,
                ..Default::default()
            })
        }

        fn dispatch(
            &mut self,
            request: PushRequest,
            suspended: bool,
        ) -> Result<Dispatched, StoreError> {
            let clear = ClearHandle::detached(request.id.clone());
            self.dispatcher.dispatch(
                request,
                &mut self.store,
                &mut self.scheduler,
                suspended,
                clear,
            )
        }

        fn push(&mut self, request: PushRequest) -> Result<Dispatched, StoreError> {
            self.dispatch(request, false)
        }

        fn add(&mut self, id: &str, kind: NotificationKind) -> Dispatched {
            self.push(request(id, kind)).unwrap()
        }

        fn record(&self, id: &str) -> &NotificationRecord {
            self.store.get(&NotificationId::from(id)).unwrap()
        }

        fn ids(&self) -> Vec<String> {
            self.store.iter().map(|n| n.id.to_string()).collect()
        }
    }

    fn request(id: &str, kind: NotificationKind) -> PushRequest {
        PushRequest::new(kind, NotificationOptions::default()).with_id(id)
    }

    fn timed(id: &str, kind: NotificationKind, ms: u64) -> PushRequest {
        PushRequest::new(
            kind,
            NotificationOptions::default().duration(Duration::from_millis(ms)),
        )
        .with_id(id)
    }

    #[test]
    fn test_resolve_merge_chain() {
        let mut config = ReceiverConfig::default();
        config
            .notifications
            .for_kind_mut(NotificationKind::Success)
            .title = Some("Saved".to_string());
        config.notifications.success.duration = Some(Lifetime::from_millis(1000));
        config.notifications.global.duration = Some(Lifetime::from_millis(3000));
        let dispatcher = PushDispatcher::new(config);

        let resolved = dispatcher.resolve(&PushRequest::new(
            NotificationKind::Success,
            NotificationOptions::default().message("report.pdf"),
        ));
        assert_eq!(resolved.title, "Saved");
        assert_eq!(resolved.message, "report.pdf");
        assert_eq!(resolved.duration, Lifetime::from_millis(3000));

        let resolved = dispatcher.resolve(&PushRequest::new(
            NotificationKind::Success,
            NotificationOptions::default().duration(Duration::from_millis(10)),
        ));
        assert_eq!(resolved.duration, Lifetime::from_millis(10));
    }

    #[test]
    fn test_create_schedules_timer() {
        let mut h = Harness::limited(10, InsertAt::Front);

        let outcome = h.push(timed("a", NotificationKind::Success, 2000)).unwrap();

        assert_eq!(outcome, Dispatched::Created(NotificationId::from("a")));
        assert!(h.record("a").has_live_timer());
        assert_eq!(
            h.scheduler.delay_for(&NotificationId::from("a")),
            Some(Duration::from_millis(2000))
        );
    }

    #[test]
    fn test_suspended_create_has_no_timer() {
        let mut h = Harness::limited(10, InsertAt::Front);

        h.dispatch(request("a", NotificationKind::Info), true).unwrap();

        assert!(!h.record("a").has_live_timer());
        assert!(h.scheduler.scheduled.is_empty());
    }

    #[test]
    fn test_promise_never_timed() {
        let mut h = Harness::limited(10, InsertAt::Front);

        h.push(timed("p", NotificationKind::Promise, 100)).unwrap();

        let record = h.record("p");
        assert_eq!(record.options.duration, Lifetime::Infinite);
        assert!(!record.has_live_timer());
    }

    #[test]
    fn test_limit_evicts_oldest_prepend() {
        let mut h = Harness::limited(3, InsertAt::Front);

        for id in ["A", "B", "C", "D"] {
            h.add(id, NotificationKind::Success);
        }

        assert_eq!(h.ids(), ["D", "C", "B"]);
    }

    #[test]
    fn test_limit_evicts_oldest_append() {
        let mut h = Harness::limited(3, InsertAt::Back);

        for id in ["A", "B", "C", "D"] {
            h.add(id, NotificationKind::Success);
        }

        assert_eq!(h.ids(), ["B", "C", "D"]);
    }

    #[test]
    fn test_limit_skips_promises() {
        let mut h = Harness::limited(3, InsertAt::Front);

        h.add("P", NotificationKind::Promise);
        h.add("B", NotificationKind::Info);
        h.add("C", NotificationKind::Info);
        h.add("D", NotificationKind::Info);

        assert_eq!(h.ids(), ["D", "C", "P"]);
    }

    #[test]
    fn test_limit_only_promises_visible() {
        let mut h = Harness::limited(2, InsertAt::Back);

        h.add("P1", NotificationKind::Promise);
        h.add("P2", NotificationKind::Promise);
        h.add("X", NotificationKind::Info);

        assert_eq!(h.ids(), ["P1", "P2", "X"]);
    }

    #[test]
    fn test_limit_per_type() {
        let mut h = Harness::new(ReceiverConfig {
            limit: 1,
            limit_is_per_type: true,
            ..Default::default()
        });

        h.add("s1", NotificationKind::Success);
        h.add("e1", NotificationKind::Error);
        h.add("s2", NotificationKind::Success);

        assert_eq!(h.ids(), ["s2", "e1"]);
    }

    #[test]
    fn test_continuation_updates_in_place() {
        let mut h = Harness::limited(10, InsertAt::Front);

        h.push(
            request("P", NotificationKind::Promise).with_render(RenderSpec {
                component: Some("Upload".to_string()),
                props: None,
            }),
        )
        .unwrap();
        h.add("X", NotificationKind::Info);

        let outcome = h
            .push(PushRequest::continuation(
                NotificationId::from("P"),
                NotificationKind::PromiseSuccess,
                NotificationOptions::default()
                    .title("Uploaded")
                    .duration(Duration::from_millis(2000)),
            ))
            .unwrap();

        assert_eq!(outcome, Dispatched::Continued(NotificationId::from("P")));
        assert_eq!(h.ids(), ["X", "P"]);

        let record = h.record("P");
        assert_eq!(record.kind, NotificationKind::PromiseSuccess);
        assert_eq!(record.options.title, "Uploaded");
        assert_eq!(record.render.component.as_deref(), Some("Upload"));
        assert!(record.has_live_timer());
        assert_eq!(
            h.scheduler.delay_for(&record.id),
            Some(Duration::from_millis(2000))
        );
    }

    #[test]
    fn test_continuation_without_record_creates() {
        let mut h = Harness::limited(10, InsertAt::Front);

        let outcome = h.add("gone", NotificationKind::PromiseError);

        assert_eq!(outcome, Dispatched::Created(NotificationId::from("gone")));
        assert_eq!(h.store.count(), 1);
    }

    #[test]
    fn test_disabled_drops_new_but_continues_existing() {
        let mut h = Harness::limited(10, InsertAt::Front);

        h.add("P", NotificationKind::Promise);
        h.dispatcher.set_enabled(false);

        let outcome = h.add("A", NotificationKind::Info);
        assert_eq!(outcome, Dispatched::Dropped(NotificationId::from("A")));

        let outcome = h.add("P", NotificationKind::PromiseSuccess);
        assert_eq!(outcome, Dispatched::Continued(NotificationId::from("P")));
        assert_eq!(h.ids(), ["P"]);
    }

    #[test]
    fn test_duplicate_id_is_rejected_without_eviction() {
        let mut h = Harness::limited(2, InsertAt::Front);

        h.add("A", NotificationKind::Info);
        h.add("B", NotificationKind::Info);

        let err = h.push(request("B", NotificationKind::Success)).unwrap_err();

        assert_eq!(err, StoreError::DuplicateId(NotificationId::from("B")));
        assert_eq!(h.ids(), ["B", "A"]);
    }
}
