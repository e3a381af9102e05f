//! Timer accounting across pause/resume cycles.
//!
//! All functions here are pure: they take the timestamps recorded on a
//! notification and return durations, with no clock access of their own.

use std::time::{Duration, Instant};

/// Extra delay added every time a paused timer resumes, so a notification is
/// not dismissed the instant the user releases it.
pub const RESUME_GRACE: Duration = Duration::from_millis(50);

/// Total active time at the moment a timer is paused.
///
/// `stopped_at - created_at + previous_elapsed`. A `stopped_at` earlier than
/// `created_at` contributes nothing.
pub fn elapsed_at_pause(
    created_at: Instant,
    stopped_at: Instant,
    previous_elapsed: Duration,
) -> Duration {
    stopped_at.saturating_duration_since(created_at) + previous_elapsed
}

/// Time left on a resumed timer: `duration + RESUME_GRACE - elapsed`, clamped
/// at zero.
pub fn remaining_on_resume(duration: Duration, elapsed: Duration) -> Duration {
    (duration + RESUME_GRACE).saturating_sub(elapsed)
}
