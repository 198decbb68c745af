//! One-shot alarm for deadline-driven state changes.
//!
//! The session layer records transient effects as absolute deadlines (an
//! invalid-move flash that should clear three seconds after it was raised,
//! for example). Something has to wake the driver when such a deadline
//! passes. [`Alarm`] is that something: a single re-armable deadline that
//! integrates with `tokio::select!`.
//!
//! The alarm holds at most one deadline. Arming it again *replaces* the
//! previous deadline rather than queueing a second one, which is exactly
//! the behavior a restartable flash window needs: a fresh `invalid_move`
//! while the flash is already showing pushes the clear-time out, it does
//! not schedule an extra early clear.
//!
//! # Integration
//!
//! The alarm lives as one branch of the driver's event loop:
//!
//! ```ignore
//! let mut alarm = Alarm::new();
//!
//! loop {
//!     tokio::select! {
//!         frame = connection.recv() => {
//!             // ... apply the event, then mirror the session's deadline:
//!             match session.flash_deadline() {
//!                 Some(at) => alarm.arm(Instant::from_std(at)),
//!                 None => alarm.cancel(),
//!             }
//!         }
//!         _ = alarm.fired() => {
//!             session.tick_flash(Instant::now().into_std());
//!         }
//!     }
//! }
//! ```
//!
//! While unarmed the alarm pends forever, so the `select!` needs no guard
//! condition on that branch.

use std::future;

use tokio::time::{self, Instant};
use tracing::trace;

/// A single re-armable, cancellable deadline.
///
/// `Alarm` is deliberately not a stream of ticks: it fires at most once
/// per arming, and [`fired`](Alarm::fired) disarms it on completion. The
/// caller re-arms whenever a new deadline exists.
#[derive(Debug, Default)]
pub struct Alarm {
    deadline: Option<Instant>,
}

impl Alarm {
    /// Creates an unarmed alarm.
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Arms the alarm to fire at `deadline`.
    ///
    /// Any previously armed deadline is discarded. A deadline in the past
    /// is fine; [`fired`](Alarm::fired) resolves immediately in that case.
    pub fn arm(&mut self, deadline: Instant) {
        trace!(?deadline, "alarm armed");
        self.deadline = Some(deadline);
    }

    /// Disarms the alarm without firing it.
    ///
    /// No-op when already unarmed.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            trace!("alarm cancelled");
        }
    }

    /// Whether a deadline is currently armed.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// The armed deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Waits for the armed deadline to pass, then disarms.
    ///
    /// When unarmed this pends forever, so a `select!` holding it still
    /// services its other branches.
    ///
    /// # Cancel safety
    ///
    /// The deadline is cleared only after the sleep completes. If the
    /// enclosing `select!` takes another branch first, the alarm stays
    /// armed and the next call picks up the same deadline.
    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                time::sleep_until(deadline).await;
                self.deadline = None;
                trace!("alarm fired");
            }
            None => {
                // Unarmed: block this branch until someone re-arms us on
                // a different branch of the caller's select!.
                future::pending::<()>().await;
                unreachable!("pending future never resolves")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_new_alarm_is_unarmed() {
        let alarm = Alarm::new();
        assert!(!alarm.is_armed());
        assert!(alarm.deadline().is_none());
    }

    #[test]
    fn test_default_matches_new() {
        let alarm = Alarm::default();
        assert!(!alarm.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_arm_records_deadline() {
        let mut alarm = Alarm::new();
        let deadline = Instant::now() + Duration::from_secs(3);

        alarm.arm(deadline);

        assert!(alarm.is_armed());
        assert_eq!(alarm.deadline(), Some(deadline));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_deadline() {
        let mut alarm = Alarm::new();
        let first = Instant::now() + Duration::from_secs(3);
        let second = Instant::now() + Duration::from_secs(5);

        alarm.arm(first);
        alarm.arm(second);

        assert_eq!(alarm.deadline(), Some(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_disarms() {
        let mut alarm = Alarm::new();
        alarm.arm(Instant::now() + Duration::from_secs(3));

        alarm.cancel();

        assert!(!alarm.is_armed());
        assert!(alarm.deadline().is_none());
    }

    #[test]
    fn test_cancel_when_unarmed_is_noop() {
        let mut alarm = Alarm::new();
        alarm.cancel();
        assert!(!alarm.is_armed());
    }
}
