//! Waveform synthesis and 8-bit DAC output for the funcgen signal generator.
//!
//! This crate provides [`PhaseAccumulator`] + [`waveform_sample`] (pure
//! synthesis), [`quantize`] (millivolts → saturating 8-bit code),
//! [`ParallelDac`] (eight GPIO bits, LSB first), and, behind the `task`
//! feature, [`signal_output_task`], the sampling loop that ties them
//! together.
//!
//! # Quick Start
//!
//! ```ignore
//! use funcgen_dac_output_rs::{signal_output_task, ParallelDac, SamplingConfig};
//!
//! // In your Embassy main:
//! let dac = ParallelDac::new(dac_pins);
//! spawner.spawn(dac_task(dac, signal_params, SamplingConfig::default())).unwrap();
//!
//! // Thin task wrapper (Embassy tasks cannot be generic):
//! #[embassy_executor::task]
//! async fn dac_task(
//!     dac: ParallelDac<Output<'static>>,
//!     params: &'static Mutex<CriticalSectionRawMutex, Cell<SignalParameters>>,
//!     config: SamplingConfig,
//! ) {
//!     signal_output_task(dac, params, config).await;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`task`** — the Embassy sampling task (pulls in `embassy-sync` and
//!   `embassy-time`).
//! - **`defmt`** — structured logging via [`defmt`].
//!
//! [`signal_output_task`]: output_task::signal_output_task

#![no_std]

pub mod driver;
pub mod output_task;
pub mod quantizer;
pub mod synth;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use driver::ParallelDac;
#[cfg(feature = "task")]
pub use output_task::signal_output_task;
pub use output_task::SamplingConfig;
pub use quantizer::quantize;
pub use synth::{waveform_sample, PhaseAccumulator};
