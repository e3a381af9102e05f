use crate::subscriptions::notifier::ClearHandle;
use crate::timer::{Scheduler, TimerHandle, TimerToken};
use std::time::Duration;
use toast_notifications_util::{
    NotificationId, NotificationKind, RenderSpec, ResolvedOptions, elapsed_at_pause,
    remaining_on_resume,
};
use tokio::time::Instant;

/// One queued notification and its dismissal timer.
#[derive(Debug)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub options: ResolvedOptions,
    pub render: RenderSpec,
    /// When the active timer last started.
    pub created_at: Instant,
    /// When the timer was last paused.
    pub stopped_at: Option<Instant>,
    /// Active time accumulated over every pause/resume cycle.
    pub elapsed: Duration,
    /// `elapsed` at the moment the current state began. A promise
    /// continuation starts a fresh lifetime without rewinding `elapsed`.
    elapsed_offset: Duration,
    timer: Option<TimerHandle>,
    pub clear: ClearHandle,
}

impl NotificationRecord {
    pub fn new(
        id: NotificationId,
        kind: NotificationKind,
        options: ResolvedOptions,
        render: RenderSpec,
        now: Instant,
        clear: ClearHandle,
    ) -> Self {
        Self {
            id,
            kind,
            options,
            render,
            created_at: now,
            stopped_at: None,
            elapsed: Duration::ZERO,
            elapsed_offset: Duration::ZERO,
            timer: None,
            clear,
        }
    }

    pub fn has_live_timer(&self) -> bool {
        self.timer.is_some()
    }

    pub fn timer_token(&self) -> Option<TimerToken> {
        self.timer.as_ref().map(TimerHandle::token)
    }

    /// Whether this record may ever own a timer.
    pub fn is_timed(&self) -> bool {
        !self.kind.is_promise() && self.options.duration.is_finite()
    }

    /// Active time spent in the current state.
    pub fn active_elapsed(&self) -> Duration {
        self.elapsed.saturating_sub(self.elapsed_offset)
    }

    pub fn cancel_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    /// Start a timer for the full duration of the current state.
    pub fn start_timer(&mut self, scheduler: &mut impl Scheduler, now: Instant) {
        self.cancel_timer();
        self.created_at = now;
        if !self.is_timed() {
            return;
        }
        if let Some(duration) = self.options.duration.as_duration() {
            self.timer = Some(scheduler.schedule(self.id.clone(), duration));
        }
    }

    /// Pause a live timer, folding the time it ran into `elapsed`.
    ///
    /// Returns `false` and changes nothing when there is no live timer.
    pub fn pause(&mut self, now: Instant) -> bool {
        if self.timer.is_none() {
            return false;
        }
        self.cancel_timer();
        self.stopped_at = Some(now);
        self.elapsed = elapsed_at_pause(self.created_at.into_std(), now.into_std(), self.elapsed);
        true
    }

    /// Schedule the remaining time of a paused state, plus the resume grace.
    ///
    /// Returns `false` for records that never own a timer.
    pub fn resume(&mut self, scheduler: &mut impl Scheduler, now: Instant) -> bool {
        self.cancel_timer();
        self.created_at = now;
        if !self.is_timed() {
            return false;
        }
        let Some(duration) = self.options.duration.as_duration() else {
            return false;
        };
        let remaining = remaining_on_resume(duration, self.active_elapsed());
        self.timer = Some(scheduler.schedule(self.id.clone(), remaining));
        true
    }

    /// Move this record into a new promise state, keeping its identity.
    ///
    /// The render association is carried forward where `render` leaves it
    /// unset. The timer is cancelled; the caller decides whether to start a
    /// new one.
    pub fn continue_as(
        &mut self,
        kind: NotificationKind,
        options: ResolvedOptions,
        render: RenderSpec,
        now: Instant,
    ) {
        self.cancel_timer();
        self.kind = kind;
        self.options = options;
        self.render = render.or_previous(&self.render);
        self.created_at = now;
        self.stopped_at = None;
        self.elapsed_offset = self.elapsed;
    }
}
