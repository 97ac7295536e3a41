//! Live signal parameters and the input logic that mutates them.
//!
//! This module provides the [`SignalParameters`] store (the single shared
//! state read by the sampling loop and written by the input tasks) together
//! with the machinery that turns raw key and button events into validated
//! parameter commits.
//!
//! # Architecture
//!
//! ```text
//! keypad events ──▶ DebounceGate ──▶ NumericEntry ──┐
//!                                                   ├──▶ SignalParameters
//! button events ──▶ WaveformSelector ───────────────┘         │
//!                                                             ▼
//!                                              sampling loop (reads a copy
//!                                              once per sample)
//! ```
//!
//! Each input source owns its own [`DebounceGate`]: a burst of bounce on the
//! waveform button can never swallow keypad events, and vice versa.
//!
//! # Validation
//!
//! Every write path clamps before storing. Out-of-range entry is not an
//! error; it saturates at the nearest bound. A parameter can therefore never
//! be observed outside its documented range.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation: the digit buffer is a fixed-capacity
//! [`heapless::String`]. The optional `defmt` feature derives
//! [`defmt::Format`] on the public types for structured logging on embedded
//! targets.

mod debounce;
mod entry;
mod params;
mod selector;

pub use debounce::DebounceGate;
pub use entry::{EntryEvent, NumericEntry};
pub use params::{SignalParameters, TargetParameter, Waveform};
pub use selector::WaveformSelector;

use embassy_time::Duration;

/// Minimum amplitude in millivolts.
pub const AMPLITUDE_MIN_MV: f32 = 100.0;

/// Maximum amplitude in millivolts.
pub const AMPLITUDE_MAX_MV: f32 = 2500.0;

/// Minimum frequency in hertz.
pub const FREQUENCY_MIN_HZ: f32 = 1.0;

/// Maximum frequency in hertz.
pub const FREQUENCY_MAX_HZ: f32 = 12_000_000.0;

/// Minimum DC offset in millivolts (half the minimum amplitude).
pub const DC_OFFSET_MIN_MV: f32 = AMPLITUDE_MIN_MV / 2.0;

/// Maximum DC offset in millivolts (half the maximum amplitude).
pub const DC_OFFSET_MAX_MV: f32 = AMPLITUDE_MAX_MV / 2.0;

/// Amplitude at power-on, millivolts.
pub const DEFAULT_AMPLITUDE_MV: f32 = 1000.0;

/// Frequency at power-on, hertz.
pub const DEFAULT_FREQUENCY_HZ: f32 = 10.0;

/// DC offset at power-on, millivolts.
pub const DEFAULT_DC_OFFSET_MV: f32 = 500.0;

/// Maximum number of digits a single entry session accumulates. Further
/// digits are dropped silently.
pub const DIGIT_BUFFER_CAPACITY: usize = 19;

/// Debounce window for the waveform push-button.
pub const BUTTON_DEBOUNCE: Duration = Duration::from_millis(10);

/// Debounce window for keypad key events.
pub const KEYPAD_DEBOUNCE: Duration = Duration::from_millis(50);
