//! funcgen-hw-interface
//!
//! Keypad/button → SignalParameters → DAC integration firmware for the
//! Raspberry Pi Pico 2. Wires the three library crates into a live signal
//! generator:
//!
//! 1. The sampling task ticks at the configured sample rate, copies the
//!    shared `SignalParameters`, synthesizes one sample, and presents the
//!    quantized code on the parallel DAC pins.
//! 2. The keypad task polls the 4×4 matrix, turns held-key levels into
//!    debounced edge events, and feeds them through `NumericEntry`:
//!    `A`/`B`/`C` select a parameter, digits accumulate, `D` commits.
//! 3. The button task wakes on a falling edge of the waveform button and
//!    advances the shape through `WaveformSelector`.
//!
//! All three tasks share one `SignalParameters` cell behind a
//! critical-section mutex; every access is a whole-struct copy, so the
//! sampling loop can never observe a half-written parameter.

#![no_std]
#![no_main]

use core::cell::Cell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Instant, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use funcgen::signal_control::{
    DebounceGate, EntryEvent, NumericEntry, SignalParameters, WaveformSelector,
    BUTTON_DEBOUNCE, KEYPAD_DEBOUNCE,
};
use funcgen_dac_output_rs::{signal_output_task, ParallelDac, SamplingConfig};
use keypad_matrix::MatrixKeypad;

// ---------------------------------------------------------------------------
// Boot block
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Shared signal parameters — written by the keypad and button tasks, read
/// by the sampling task, always as a whole-struct copy inside the
/// critical-section lock.
static SIGNAL_PARAMS: StaticCell<
    Mutex<CriticalSectionRawMutex, Cell<SignalParameters>>,
> = StaticCell::new();

/// Shorthand for the shared-store type the tasks take.
type ParamsMutex = Mutex<CriticalSectionRawMutex, Cell<SignalParameters>>;

/// How often the keypad matrix is polled for a held key.
const KEYPAD_POLL: Duration = Duration::from_millis(10);

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Thin wrapper that monomorphises the generic `signal_output_task` so it
/// can be spawned as a concrete Embassy task.
#[embassy_executor::task]
async fn dac_task(
    dac: ParallelDac<Output<'static>>,
    params: &'static ParamsMutex,
    config: SamplingConfig,
) {
    signal_output_task(dac, params, config).await;
}

/// Polling keypad input task.
///
/// Scans the matrix every `KEYPAD_POLL`, converts the held-key level into
/// edge events (a key fires once when it becomes the held key, not on
/// every poll while it stays down), debounces the edges, and feeds them
/// through the numeric entry state machine. The mutex is held only for the
/// in-memory update — never across a scan or a timer wait.
#[embassy_executor::task]
async fn keypad_task(
    mut keypad: MatrixKeypad<Output<'static>, Input<'static>>,
    params: &'static ParamsMutex,
) {
    info!("Keypad task started");

    let mut gate = DebounceGate::new(KEYPAD_DEBOUNCE);
    let mut entry = NumericEntry::new();
    let mut held: Option<char> = None;

    loop {
        Timer::after(KEYPAD_POLL).await;

        let current = match keypad.scan() {
            Ok(key) => key,
            // Pin errors are impossible on RP2350 GPIO; skip the poll if a
            // future port makes them real.
            Err(_) => {
                warn!("Keypad scan failed");
                continue;
            }
        };

        // Edge detection: only a newly-held key produces an event. Release
        // is tracked so the same key can fire again after a gap, without
        // ever spin-waiting on the release itself.
        let event_key = match (held, current) {
            (None, Some(key)) => Some(key),
            (Some(previous), Some(key)) if key != previous => Some(key),
            _ => None,
        };
        held = current;

        let Some(key) = event_key else { continue };
        if !gate.should_accept(Instant::now()) {
            continue;
        }

        // Mutex held only for the in-memory update.
        let event = params.lock(|cell| {
            let mut snapshot = cell.get();
            let event = entry.handle_key(key, &mut snapshot);
            cell.set(snapshot);
            event
        });

        match event {
            EntryEvent::SelectionStarted(target) => info!("Entering {}", target.name()),
            EntryEvent::DigitAccepted(digit) => debug!("Digit {}", digit),
            EntryEvent::DigitDropped => warn!("Digit buffer full; key dropped"),
            EntryEvent::Committed { target, value } => {
                info!("{} set to {}", target.name(), value)
            }
            EntryEvent::Ignored => {}
        }
    }
}

/// Interrupt-driven waveform button task.
///
/// The button pulls GP16 to ground, so a press is a falling edge. Bounce
/// on the edge is filtered by the selector's own debounce gate; the task
/// never blocks anything while the button stays held.
#[embassy_executor::task]
async fn button_task(mut button: Input<'static>, params: &'static ParamsMutex) {
    info!("Waveform button task started");

    let mut selector = WaveformSelector::new(BUTTON_DEBOUNCE);

    loop {
        button.wait_for_falling_edge().await;

        let advanced = params.lock(|cell| {
            let mut snapshot = cell.get();
            let advanced = selector.on_press(Instant::now(), &mut snapshot);
            cell.set(snapshot);
            advanced
        });

        if let Some(waveform) = advanced {
            info!("Waveform changed to {}", waveform.name());
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("funcgen-hw-interface starting");

    // —— Pin assignments ————————————————————————————————————————————————————
    // WAVE_BTN  → GP16              button to ground, pull-up enabled
    // KEY_ROW0–3 → GP18, GP19, GP20, GP21   outputs, idle high
    // KEY_COL0–3 → GP22, GP26, GP27, GP28   inputs, pull-up enabled
    // DAC_BIT0–7 → GP0–GP7          outputs, LSB first
    // ———————————————————————————————————————————————————————————————————————

    let rows = [
        Output::new(p.PIN_18, Level::High),
        Output::new(p.PIN_19, Level::High),
        Output::new(p.PIN_20, Level::High),
        Output::new(p.PIN_21, Level::High),
    ];
    let cols = [
        Input::new(p.PIN_22, Pull::Up),
        Input::new(p.PIN_26, Pull::Up),
        Input::new(p.PIN_27, Pull::Up),
        Input::new(p.PIN_28, Pull::Up),
    ];
    let keypad = match MatrixKeypad::new(rows, cols) {
        Ok(keypad) => keypad,
        Err(_) => {
            error!("Keypad init failed");
            return;
        }
    };

    // Waveform button: active-low, pull-up enabled.
    let button = Input::new(p.PIN_16, Pull::Up);

    // External 8-bit DAC on GP0–GP7, LSB first. Start at code 0.
    let dac = ParallelDac::new([
        Output::new(p.PIN_0, Level::Low),
        Output::new(p.PIN_1, Level::Low),
        Output::new(p.PIN_2, Level::Low),
        Output::new(p.PIN_3, Level::Low),
        Output::new(p.PIN_4, Level::Low),
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
    ]);

    // Initialise shared parameter state with the power-on defaults.
    let defaults = SignalParameters::new();
    info!(
        "Defaults: {} mV amplitude, {} Hz, {} mV offset, {}",
        defaults.amplitude_mv,
        defaults.frequency_hz,
        defaults.dc_offset_mv,
        defaults.waveform.name()
    );
    let signal_params = SIGNAL_PARAMS.init(Mutex::new(Cell::new(defaults)));

    // —— Spawn tasks ————————————————————————————————————————————————————————

    let config = SamplingConfig::default(); // 20 kHz sample rate

    spawner.spawn(dac_task(dac, signal_params, config)).unwrap();
    spawner.spawn(keypad_task(keypad, signal_params)).unwrap();
    spawner.spawn(button_task(button, signal_params)).unwrap();

    info!("All tasks spawned");
}
