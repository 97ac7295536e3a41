use embassy_time::{Duration, Instant};

/// Minimum-interval filter for one logical input source.
///
/// A mechanical switch produces a burst of electrical transitions per press;
/// the gate accepts at most one event per configured interval and ignores
/// the rest. Timestamps are passed in by the caller, so the gate itself
/// never touches the clock: tasks pass `Instant::now()`, tests pass
/// synthetic instants.
///
/// Each monitored source needs its own gate: a flood of events on the
/// waveform button must not suppress keypad events, and vice versa.
///
/// # Examples
///
/// ```
/// use embassy_time::{Duration, Instant};
/// use funcgen::signal_control::DebounceGate;
///
/// let mut gate = DebounceGate::new(Duration::from_millis(10));
/// assert!(gate.should_accept(Instant::from_millis(0)));
/// assert!(!gate.should_accept(Instant::from_millis(5))); // bounce
/// assert!(gate.should_accept(Instant::from_millis(10)));
/// ```
pub struct DebounceGate {
    interval: Duration,
    last_accepted: Option<Instant>,
}

impl DebounceGate {
    /// Create a gate that accepts at most one event per `interval`.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_accepted: None,
        }
    }

    /// Returns `true` and records `now` iff at least the configured interval
    /// has elapsed since the last accepted event.
    ///
    /// The first event after construction is always accepted. An event
    /// arriving exactly one interval after the previous acceptance is
    /// accepted (`now - last >= interval`).
    pub fn should_accept(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now < last + self.interval => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn first_event_is_accepted() {
        let mut gate = DebounceGate::new(Duration::from_millis(50));
        assert!(gate.should_accept(at(0)));
    }

    #[test]
    fn events_inside_the_window_are_rejected() {
        let mut gate = DebounceGate::new(Duration::from_millis(50));
        assert!(gate.should_accept(at(100)));
        assert!(!gate.should_accept(at(101)));
        assert!(!gate.should_accept(at(149)));
    }

    #[test]
    fn event_at_exactly_the_interval_is_accepted() {
        let mut gate = DebounceGate::new(Duration::from_millis(50));
        assert!(gate.should_accept(at(100)));
        assert!(gate.should_accept(at(150)));
    }

    #[test]
    fn one_acceptance_per_rapid_fire_cluster() {
        let mut gate = DebounceGate::new(Duration::from_millis(50));

        // Simulated bounce: transitions every millisecond for 30 ms.
        let accepted = (0..30).filter(|&ms| gate.should_accept(at(ms))).count();
        assert_eq!(accepted, 1);
    }

    #[test]
    fn rejected_events_do_not_extend_the_window() {
        let mut gate = DebounceGate::new(Duration::from_millis(50));
        assert!(gate.should_accept(at(0)));
        // Rejected bounce at t=49 must not push the window past t=50.
        assert!(!gate.should_accept(at(49)));
        assert!(gate.should_accept(at(50)));
    }

    #[test]
    fn gates_are_independent_per_source() {
        let mut button = DebounceGate::new(Duration::from_millis(50));
        let mut keypad = DebounceGate::new(Duration::from_millis(50));

        assert!(button.should_accept(at(0)));
        // A fresh acceptance on the button does not consume the keypad window.
        assert!(keypad.should_accept(at(1)));
    }
}
