//! Matrix scanner.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::layout::{key_at, COLS, ROWS};

/// Scanner for a 4×4 matrix keypad.
///
/// Owns four row output pins (idle high) and four column input pins
/// (externally or internally pulled up). Scanning drives one row low at a
/// time and reads the columns; a low column identifies the pressed key.
///
/// The scanner reports *level*, not edges: while a key is held, every scan
/// returns it. Callers poll periodically and turn level changes into
/// events; no method here ever busy-waits for a release.
///
/// # Example
///
/// ```ignore
/// use keypad_matrix::MatrixKeypad;
///
/// let mut keypad = MatrixKeypad::new(rows, cols)?;
/// loop {
///     if let Some(key) = keypad.scan()? {
///         // handle the held key
///     }
///     // sleep one poll period
/// }
/// ```
pub struct MatrixKeypad<O, I> {
    rows: [O; ROWS],
    cols: [I; COLS],
}

impl<O, I> MatrixKeypad<O, I>
where
    O: OutputPin,
    I: InputPin<Error = O::Error>,
{
    /// Create a scanner and park all rows high (inactive).
    ///
    /// # Arguments
    /// * `rows` — Row output pins, top row first.
    /// * `cols` — Column input pins, leftmost column first. Must be pulled
    ///   up so an idle column reads high.
    ///
    /// # Errors
    /// Propagates the first pin error while parking the rows. On GPIO
    /// hardware the pin error type is typically `Infallible`.
    pub fn new(rows: [O; ROWS], cols: [I; COLS]) -> Result<Self, O::Error> {
        let mut keypad = Self { rows, cols };
        for row in &mut keypad.rows {
            row.set_high()?;
        }
        Ok(keypad)
    }

    /// Walk all rows once and report the key currently held, if any.
    ///
    /// Rows are scanned top to bottom and the first pressed key wins;
    /// simultaneous presses in later rows are not reported. Each row is
    /// restored high before the next is driven, so the matrix is left
    /// inactive when the scan returns.
    ///
    /// # Errors
    /// Propagates the first pin error. The active row is restored high
    /// before a column-read error is returned.
    pub fn scan(&mut self) -> Result<Option<char>, O::Error> {
        for row_idx in 0..ROWS {
            self.rows[row_idx].set_low()?;
            let pressed = Self::pressed_column(&mut self.cols);
            self.rows[row_idx].set_high()?;

            if let Some(col_idx) = pressed? {
                return Ok(key_at(row_idx, col_idx));
            }
        }
        Ok(None)
    }

    /// Index of the first low column, if any.
    fn pressed_column(cols: &mut [I; COLS]) -> Result<Option<usize>, I::Error> {
        for (col_idx, col) in cols.iter_mut().enumerate() {
            if col.is_low()? {
                return Ok(Some(col_idx));
            }
        }
        Ok(None)
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Simulated electrical state of the matrix: which row the scanner is
    /// currently driving low, and which key (row, col) is physically held.
    struct Harness {
        driven_row: Cell<Option<usize>>,
        pressed: Cell<Option<(usize, usize)>>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                driven_row: Cell::new(None),
                pressed: Cell::new(None),
            }
        }
    }

    struct RowPin<'a> {
        idx: usize,
        harness: &'a Harness,
    }

    impl ErrorType for RowPin<'_> {
        type Error = Infallible;
    }

    impl OutputPin for RowPin<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.harness.driven_row.set(Some(self.idx));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            if self.harness.driven_row.get() == Some(self.idx) {
                self.harness.driven_row.set(None);
            }
            Ok(())
        }
    }

    struct ColPin<'a> {
        idx: usize,
        harness: &'a Harness,
    }

    impl ErrorType for ColPin<'_> {
        type Error = Infallible;
    }

    impl InputPin for ColPin<'_> {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(!self.is_low()?)
        }

        // A column reads low iff the held key's row is the one being driven.
        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(
                match (self.harness.driven_row.get(), self.harness.pressed.get()) {
                    (Some(driven), Some((row, col))) => driven == row && col == self.idx,
                    _ => false,
                },
            )
        }
    }

    fn keypad(harness: &Harness) -> MatrixKeypad<RowPin<'_>, ColPin<'_>> {
        let rows = core::array::from_fn(|idx| RowPin { idx, harness });
        let cols = core::array::from_fn(|idx| ColPin { idx, harness });
        MatrixKeypad::new(rows, cols).unwrap()
    }

    #[test]
    fn idle_matrix_scans_to_none() {
        let harness = Harness::new();
        let mut keypad = keypad(&harness);
        assert_eq!(keypad.scan().unwrap(), None);
    }

    #[test]
    fn held_key_is_reported_at_its_intersection() {
        let harness = Harness::new();
        let mut keypad = keypad(&harness);

        harness.pressed.set(Some((1, 2)));
        assert_eq!(keypad.scan().unwrap(), Some('6'));
    }

    #[test]
    fn every_position_scans_to_its_layout_key() {
        let harness = Harness::new();
        let mut keypad = keypad(&harness);

        for row in 0..ROWS {
            for col in 0..COLS {
                harness.pressed.set(Some((row, col)));
                assert_eq!(keypad.scan().unwrap(), key_at(row, col));
            }
        }
    }

    #[test]
    fn scan_is_level_based_until_release() {
        let harness = Harness::new();
        let mut keypad = keypad(&harness);

        harness.pressed.set(Some((3, 3)));
        assert_eq!(keypad.scan().unwrap(), Some('D'));
        assert_eq!(keypad.scan().unwrap(), Some('D'));

        harness.pressed.set(None);
        assert_eq!(keypad.scan().unwrap(), None);
    }

    #[test]
    fn scan_leaves_no_row_driven() {
        let harness = Harness::new();
        let mut keypad = keypad(&harness);

        harness.pressed.set(Some((2, 0)));
        keypad.scan().unwrap();
        assert_eq!(harness.driven_row.get(), None);
    }
}
