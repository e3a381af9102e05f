//! Pause-on-interaction for dismissal timers.

use crate::handlers::messages::InteractionSource;
use crate::state::notifications::NotificationStore;
use crate::timer::Scheduler;
use toast_notifications_config::ReceiverConfig;
use tokio::time::Instant;

/// Tracks whether the notification area is being interacted with.
///
/// While suspended no record owns a live timer. Only one source holds the
/// suspension, so a hover and a touch overlapping are treated as one
/// interaction.
#[derive(Debug)]
pub struct InteractionController {
    suspended_by: Option<InteractionSource>,
    pause_on_hover: bool,
    pause_on_touch: bool,
}

impl InteractionController {
    pub fn new(config: &ReceiverConfig) -> Self {
        Self {
            suspended_by: None,
            pause_on_hover: config.pause_on_hover,
            pause_on_touch: config.pause_on_touch,
        }
    }

    pub fn set_config(&mut self, config: &ReceiverConfig) {
        self.pause_on_hover = config.pause_on_hover;
        self.pause_on_touch = config.pause_on_touch;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended_by.is_some()
    }

    /// Whether interactions from `source` pause timers.
    pub fn accepts(&self, source: InteractionSource) -> bool {
        match source {
            InteractionSource::Hover => self.pause_on_hover,
            InteractionSource::Touch => self.pause_on_touch,
        }
    }

    /// Pause every live timer. Returns `false` if nothing changed.
    pub fn suspend(&mut self, source: InteractionSource, store: &mut NotificationStore) -> bool {
        if !self.accepts(source) || self.is_suspended() || store.is_empty() {
            return false;
        }

        let now = Instant::now();
        store.update_all(|mut record| {
            record.pause(now);
            record
        });
        self.suspended_by = Some(source);

        tracing::debug!("Notification timers paused ({:?})", source);
        true
    }

    /// Reschedule every timed record for its remaining time plus the resume
    /// grace. Returns `false` if nothing changed.
    ///
    /// The source that started the suspension can always end it, even if
    /// pausing for that source was switched off in between.
    pub fn resume(
        &mut self,
        source: InteractionSource,
        store: &mut NotificationStore,
        scheduler: &mut impl Scheduler,
    ) -> bool {
        let Some(holder) = self.suspended_by else {
            return false;
        };
        if holder != source && !self.accepts(source) {
            return false;
        }

        let now = Instant::now();
        store.update_all(|mut record| {
            record.resume(&mut *scheduler, now);
            record
        });
        self.suspended_by = None;

        tracing::debug!("Notification timers resumed ({:?})", source);
        true
    }

    /// Leaving the interaction state with nothing visible needs no resume.
    pub fn reset_if_empty(&mut self, store: &NotificationStore) -> bool {
        if self.is_suspended() && store.is_empty() {
            self.suspended_by = None;
            return true;
        }
        false
    }
}
