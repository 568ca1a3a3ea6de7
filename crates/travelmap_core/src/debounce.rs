//! Quiescence-window debouncer.
//!
//! # Responsibility
//! - Hold back an invocation until calls stop arriving for one window.
//! - Keep only the most recent arguments of a burst.
//!
//! # Invariants
//! - At most one invocation is pending at any time.
//! - A call while pending replaces both arguments and deadline.
//! - A pending invocation fires at most once.
//!
//! The state machine is driven by caller-supplied instants so it stays
//! deterministic under test; [`Debouncer::wait`] is the blocking driver.

use std::time::{Duration, Instant};

/// Default quiescence window used by the search input.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Debouncer lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState<A> {
    /// Nothing scheduled yet.
    Idle,
    /// An invocation with `args` fires once `deadline` is reached.
    Pending { deadline: Instant, args: A },
    /// The last scheduled invocation has fired.
    Fired,
}

/// Debouncer over invocation arguments of type `A`.
#[derive(Debug, Clone)]
pub struct Debouncer<A> {
    window: Duration,
    state: DebounceState<A>,
}

impl<A> Debouncer<A> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: DebounceState::Idle,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> &DebounceState<A> {
        &self.state
    }

    /// Schedules `args` to fire one window after `now`.
    ///
    /// Cancels any pending invocation.
    pub fn call(&mut self, args: A, now: Instant) {
        self.state = DebounceState::Pending {
            deadline: now + self.window,
            args,
        };
    }

    /// Drops the pending invocation, returning its arguments.
    pub fn cancel(&mut self) -> Option<A> {
        match std::mem::replace(&mut self.state, DebounceState::Idle) {
            DebounceState::Pending { args, .. } => Some(args),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Deadline of the pending invocation, if any.
    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::Pending { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// Fires the pending invocation when `now` has reached its deadline.
    ///
    /// Returns the arguments to invoke with, or `None` when nothing is due.
    pub fn poll(&mut self, now: Instant) -> Option<A> {
        match &self.state {
            DebounceState::Pending { deadline, .. } if now >= *deadline => {}
            _ => return None,
        }
        match std::mem::replace(&mut self.state, DebounceState::Fired) {
            DebounceState::Pending { args, .. } => Some(args),
            _ => None,
        }
    }

    /// Blocks until the pending invocation is due and fires it.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub fn wait(&mut self) -> Option<A> {
        let deadline = self.deadline()?;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        self.poll(deadline.max(Instant::now()))
    }
}

impl<A> Default for Debouncer<A> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::{DebounceState, Debouncer};
    use std::time::{Duration, Instant};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn burst_fires_once_with_last_arguments() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        let mut fired = Vec::new();

        debouncer.call("jai", start);
        debouncer.call("jaip", start + ms(100));
        debouncer.call("jaipu", start + ms(150));

        for tick in (0..=600).step_by(10) {
            if let Some(args) = debouncer.poll(start + ms(tick)) {
                fired.push((tick, args));
            }
        }

        assert_eq!(fired, vec![(450, "jaipu")]);
        assert_eq!(debouncer.state(), &DebounceState::Fired);
    }

    #[test]
    fn poll_before_deadline_keeps_pending() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        debouncer.call(1, start);

        assert_eq!(debouncer.poll(start + ms(299)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.deadline(), Some(start + ms(300)));
    }

    #[test]
    fn cancel_returns_pending_arguments() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        assert_eq!(debouncer.cancel(), None);

        debouncer.call("goa", start);
        assert_eq!(debouncer.cancel(), Some("goa"));
        assert_eq!(debouncer.state(), &DebounceState::Idle);
        assert_eq!(debouncer.poll(start + ms(1_000)), None);
    }

    #[test]
    fn call_after_fire_schedules_again() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        debouncer.call("agra", start);
        assert_eq!(debouncer.poll(start + ms(300)), Some("agra"));

        debouncer.call("delhi", start + ms(400));
        assert_eq!(debouncer.poll(start + ms(650)), None);
        assert_eq!(debouncer.poll(start + ms(700)), Some("delhi"));
    }

    #[test]
    fn wait_blocks_until_deadline() {
        let mut debouncer = Debouncer::new(ms(20));
        let started = Instant::now();
        debouncer.call("pune", started);

        assert_eq!(debouncer.wait(), Some("pune"));
        assert!(started.elapsed() >= ms(20));
        assert_eq!(debouncer.wait(), None);
    }
}
