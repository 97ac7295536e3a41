use heapless::String;

use super::params::{SignalParameters, TargetParameter};
use super::DIGIT_BUFFER_CAPACITY;

/// What one key event did to the entry state machine.
///
/// Returned by [`NumericEntry::handle_key`] so the firmware can log state
/// changes without re-deriving them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryEvent {
    /// A selector key opened (or restarted) an entry session.
    SelectionStarted(TargetParameter),
    /// A digit was appended to the buffer.
    DigitAccepted(char),
    /// The buffer was already full; the digit was dropped.
    DigitDropped,
    /// The confirm key committed a parsed, clamped value to the store.
    Committed {
        /// Parameter the session targeted.
        target: TargetParameter,
        /// Value actually stored, after clamping.
        value: f32,
    },
    /// The key had no effect in the current state.
    Ignored,
}

/// Interprets the keypad stream as parameter entry.
///
/// Two states: *idle* (no parameter selected; digits and confirm are
/// ignored) and *selecting* (a selector key was seen; digits accumulate in
/// the buffer until the confirm key commits them).
///
/// Transition rules:
///
/// - `A`/`B`/`C` in **any** state clears the buffer and starts a session
///   for the matching parameter. Re-selecting mid-entry deliberately
///   discards buffered digits.
/// - `0`–`9` while selecting appends, up to [`DIGIT_BUFFER_CAPACITY`]
///   digits; further digits are dropped silently.
/// - `D` while selecting parses the buffer as a decimal number (an empty
///   buffer parses as `0.0`), clamps it into the target's valid range,
///   commits it to the store, and returns to idle.
/// - Everything else (`*`, `#`, digits while idle, `D` while idle) is
///   ignored silently.
#[derive(Default)]
pub struct NumericEntry {
    target: Option<TargetParameter>,
    buffer: String<DIGIT_BUFFER_CAPACITY>,
}

impl NumericEntry {
    /// Create an idle state machine with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no parameter is selected.
    pub fn is_idle(&self) -> bool {
        self.target.is_none()
    }

    /// Digits accumulated in the current session.
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Feed one debounced key event through the state machine.
    ///
    /// Commits write to `params` via its clamped setters, so the store
    /// invariant holds no matter what was typed.
    pub fn handle_key(&mut self, key: char, params: &mut SignalParameters) -> EntryEvent {
        if let Some(target) = TargetParameter::from_selector(key) {
            // Selector in any state restarts the session.
            self.buffer.clear();
            self.target = Some(target);
            return EntryEvent::SelectionStarted(target);
        }

        match (self.target, key) {
            (Some(target), 'D') => {
                // Empty (or otherwise unparseable) buffers read as 0.0 and
                // then saturate at the range floor.
                let raw: f32 = self.buffer.parse().unwrap_or(0.0);
                let value = target.clamp(raw);
                params.set(target, value);
                self.buffer.clear();
                self.target = None;
                EntryEvent::Committed { target, value }
            }
            (Some(_), digit @ '0'..='9') => {
                if self.buffer.push(digit).is_ok() {
                    EntryEvent::DigitAccepted(digit)
                } else {
                    EntryEvent::DigitDropped
                }
            }
            _ => EntryEvent::Ignored,
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
