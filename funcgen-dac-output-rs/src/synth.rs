//! Waveform synthesis.
//!
//! Split into a stateful [`PhaseAccumulator`] and the pure
//! [`waveform_sample`] function so the shape math is testable without a
//! clock.
//!
//! # Time basis
//!
//! The synthesizer keeps a **running phase accumulator**: each sample
//! advances the phase by `frequency × Δt` and the instantaneous value is a
//! pure function of the accumulated phase. Recomputing phase from raw
//! elapsed time every sample (the obvious alternative) makes the output
//! frequency only statistically correct and drifts under irregular loop
//! scheduling; the accumulator keeps phase continuous no matter how the
//! loop is paced. Frequency changes take effect at the next sample without
//! a phase jump.

use micromath::F32Ext;

use funcgen::signal_control::{SignalParameters, Waveform};

/// Running waveform phase, normalised to `[0, 1)` cycles.
#[derive(Debug, Default)]
pub struct PhaseAccumulator {
    phase: f32,
}

impl PhaseAccumulator {
    /// Start at phase zero.
    pub const fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Current phase in cycles, `0.0 ≤ phase < 1.0`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance by `frequency_hz × dt_seconds` cycles and return the new
    /// phase.
    ///
    /// The increment is reduced modulo one cycle *before* it is added:
    /// at megahertz frequencies a single sample period spans hundreds of
    /// whole cycles, and folding those out first keeps the fractional part
    /// from drowning in float magnitude.
    pub fn advance(&mut self, frequency_hz: f32, dt_seconds: f32) -> f32 {
        let increment = (frequency_hz * dt_seconds).fract();
        self.phase = (self.phase + increment).fract();
        self.phase
    }
}

/// Instantaneous waveform value in millivolts at the given phase.
///
/// All four shapes are centred on `dc_offset_mv` with a peak deviation of
/// `amplitude_mv / 2`: the amplitude parameter is the peak-to-peak
/// envelope, not the peak value.
pub fn waveform_sample(
    waveform: Waveform,
    amplitude_mv: f32,
    dc_offset_mv: f32,
    phase: f32,
) -> f32 {
    let peak_mv = amplitude_mv / 2.0;

    // Normalised shape in [-1, 1].
    let shape = match waveform {
        Waveform::Sine => (core::f32::consts::TAU * phase).sin(),
        // Positive while the reference sinusoid is non-negative: the first
        // half-period, boundary included (sin(π) = 0).
        Waveform::Square => {
            if phase <= 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        // Rising ramp across the whole period, instantaneous reset at the
        // wrap.
        Waveform::Sawtooth => 2.0 * phase - 1.0,
        // Linear rise over the first half-period, linear fall over the
        // second.
        Waveform::Triangular => {
            if phase < 0.5 {
                4.0 * phase - 1.0
            } else {
                3.0 - 4.0 * phase
            }
        }
    };

    peak_mv * shape + dc_offset_mv
}

/// [`waveform_sample`] over a parameter snapshot.
pub fn sample(params: &SignalParameters, phase: f32) -> f32 {
    waveform_sample(
        params.waveform,
        params.amplitude_mv,
        params.dc_offset_mv,
        phase,
    )
}

// ── Unit Tests ───────────────────────────────────────────────────────
