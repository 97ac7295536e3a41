use embassy_time::{Duration, Instant};

use super::debounce::DebounceGate;
use super::params::{SignalParameters, Waveform};

/// Turns debounced waveform-button presses into waveform advances.
///
/// Owns its own [`DebounceGate`]: button bounce is filtered here,
/// independently of the keypad path, which shares no state with this
/// selector.
pub struct WaveformSelector {
    gate: DebounceGate,
}

impl WaveformSelector {
    /// Create a selector with the given debounce window.
    pub const fn new(debounce: Duration) -> Self {
        Self {
            gate: DebounceGate::new(debounce),
        }
    }

    /// Handle one raw button edge at time `now`.
    ///
    /// If the gate accepts the edge, advances the waveform and returns the
    /// new shape; bounce inside the window returns `None` and leaves the
    /// store untouched.
    pub fn on_press(&mut self, now: Instant, params: &mut SignalParameters) -> Option<Waveform> {
        if self.gate.should_accept(now) {
            Some(params.advance_waveform())
        } else {
            None
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
    fn qualifying_press_advances_one_step() {
        let mut selector = WaveformSelector::new(Duration::from_millis(10));
        let mut params = SignalParameters::new();

        assert_eq!(selector.on_press(at(0), &mut params), Some(Waveform::Square));
        assert_eq!(params.waveform, Waveform::Square);
    }

    #[test]
    fn bounce_inside_the_window_is_ignored() {
        let mut selector = WaveformSelector::new(Duration::from_millis(10));
        let mut params = SignalParameters::new();

        assert!(selector.on_press(at(0), &mut params).is_some());
        assert_eq!(selector.on_press(at(3), &mut params), None);
        assert_eq!(selector.on_press(at(9), &mut params), None);
        // One press, one advance.
        assert_eq!(params.waveform, Waveform::Square);
    }

    #[test]
    fn four_spaced_presses_return_to_sine() {
        let mut selector = WaveformSelector::new(Duration::from_millis(10));
        let mut params = SignalParameters::new();

        let shapes: [Option<Waveform>; 4] = core::array::from_fn(|i| {
            selector.on_press(at(100 * (i as u64 + 1)), &mut params)
        });

        assert_eq!(
            shapes,
            [
                Some(Waveform::Square),
                Some(Waveform::Sawtooth),
                Some(Waveform::Triangular),
                Some(Waveform::Sine),
            ]
        );
    }
}
