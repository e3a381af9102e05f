//! Cancellable fire-once dismissal timers.
//!
//! A timer is a spawned task that sleeps until its deadline and then delivers
//! [`Message::Expired`] back into the owning receiver's channel. The message
//! carries the [`TimerToken`] of the timer that produced it, so an expiry that
//! raced with a cancel can be recognised as stale and dropped.

use crate::handlers::messages::Message;
use std::time::Duration;
use tokio::{sync::mpsc::WeakSender, task::AbortHandle};
use toast_notifications_util::NotificationId;

/// Identifies one scheduled timer. Tokens are never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// Ownership of one outstanding timer.
///
/// Dropping the handle cancels the timer.
#[derive(Debug)]
pub struct TimerHandle {
    token: TimerToken,
    abort: Option<AbortHandle>,
}

impl TimerHandle {
    pub(crate) fn new(token: TimerToken, abort: Option<AbortHandle>) -> Self {
        Self { token, abort }
    }

    pub fn token(&self) -> TimerToken {
        self.token
    }

    /// Cancel the timer. Safe to call after it fired or was already cancelled.
    pub fn cancel(&mut self) {
        if let Some(abort) = self.abort.take() {
            abort.abort();
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A source of delayed dismissal tasks.
pub trait Scheduler {
    /// Schedule the expiry of `id` after `delay`.
    fn schedule(&mut self, id: NotificationId, delay: Duration) -> TimerHandle;
}

/// Schedules timers on the current tokio runtime.
///
/// Holds only a weak sender, so pending timers never keep a receiver's
/// channel open on their own.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: WeakSender<Message>,
    next_token: u64,
}

impl TokioScheduler {
    pub fn new(tx: WeakSender<Message>) -> Self {
        Self { tx, next_token: 0 }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, id: NotificationId, delay: Duration) -> TimerHandle {
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        let tx = self.tx.clone();

        tracing::trace!("Scheduling expiry of {} in {}ms", id, delay.as_millis());

        // Fixed now, not when the task is first polled
        let deadline = tokio::time::Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let Some(tx) = tx.upgrade() else {
                return;
            };
            if let Err(err) = tx.send(Message::Expired { id, token }).await {
                tracing::trace!("Receiver gone before expiry was delivered: {}", err);
            }
        });

        TimerHandle::new(token, Some(handle.abort_handle()))
    }
}
