//! Parallel-GPIO DAC driver.

use embedded_hal::digital::OutputPin;

/// An external 8-bit DAC driven over eight GPIO bits.
///
/// The DAC latches whatever levels sit on its inputs, so "writing" a sample
/// is just setting eight pins. Bit 0 of the code goes to the first pin;
/// wire the array LSB to MSB.
pub struct ParallelDac<O> {
    bits: [O; 8],
}

impl<O> ParallelDac<O>
where
    O: OutputPin,
{
    /// Create a driver from eight output pins, LSB first.
    pub fn new(bits: [O; 8]) -> Self {
        Self { bits }
    }

    /// Present `code` on the output pins.
    ///
    /// Bits are applied in order from LSB to MSB; the DAC sees a brief
    /// mixed state while the loop runs, which settles well inside one
    /// sample period.
    ///
    /// # Errors
    /// Propagates the first pin error. On GPIO hardware the pin error type
    /// is typically `Infallible`.
    pub fn write(&mut self, code: u8) -> Result<(), O::Error> {
        for (bit, pin) in self.bits.iter_mut().enumerate() {
            if (code >> bit) & 1 == 1 {
                pin.set_high()?;
            } else {
                pin.set_low()?;
            }
        }
        Ok(())
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
