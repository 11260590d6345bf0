//! Single-wire CAN transceiver mode control.

use embedded_hal::digital::v2::OutputPin;

/// Transceiver operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Normal transmission levels.
    Normal,
    /// High-voltage wake-up levels, used only while broadcasting the wake
    /// frame.
    HighVoltageWakeup,
}

/// Physical bus transceiver mode selection.
pub trait Transceiver {
    type Error;

    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error>;
}

/// A transceiver controlled through a single mode-select line.
///
/// The line is driven high for normal mode and low for high-voltage
/// wake-up, matching the reference board's wiring.
pub struct PinTransceiver<PIN: OutputPin> {
    pin: PIN,
}

impl<PIN: OutputPin> PinTransceiver<PIN> {
    pub fn new(pin: PIN) -> Self {
        Self { pin }
    }
}

impl<PIN: OutputPin> Transceiver for PinTransceiver<PIN> {
    type Error = PIN::Error;

    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        match mode {
            Mode::Normal => self.pin.set_high(),
            Mode::HighVoltageWakeup => self.pin.set_low(),
        }
    }
}
