//! Ampera/Eberspächer cabin heater protocol.
//!
//! The heater is a high-voltage PTC unit on a 33.3 kbit/s single-wire CAN
//! bus speaking a vendor protocol: it must be woken once with a broadcast
//! frame on 0x100 while the transceiver is in high-voltage mode, and then
//! held active by a six-frame keep-alive/command cycle replayed at a 25 to
//! 100 ms pace. Commanded power travels in the 0x10720099 frame as
//! `watts / 48`; the heater reports its actual power in the same scale in
//! an asynchronous frame on 0x1047809D.

use embedded_hal::blocking::delay::DelayUs;
use fugit::MicrosDurationU32;

use crate::{
    can::{CanBus, CanSink, Frame},
    controller::{pi::PiController, Controller},
    thermometer::{Temperature, Thermometer},
    transceiver::{Mode, Transceiver},
};

/// Broadcast wake-up frame ID.
pub const WAKEUP_ID: u32 = 0x100;
/// Keep-alive frame ID, first step of the command cycle.
pub const KEEP_ALIVE_ID: u32 = 0x621;
/// Power command frame ID.
pub const COMMAND_ID: u32 = 0x1072_0099;
/// Telemetry frame ID the heater reports its actual power on.
pub const TELEMETRY_ID: u32 = 0x1047_809D;

/// Watts per power-byte count in command and telemetry frames.
pub const POWER_SCALE_W: u16 = 48;
/// Highest commandable power: the largest multiple of 48 W that fits the
/// single power byte. Higher requests are clamped.
pub const MAX_POWER_W: u16 = 255 * POWER_SCALE_W;

/// Settle time either side of the wake-up frame while the transceiver is in
/// high-voltage mode. Must elapse fully before the next bus operation.
pub const WAKE_SETTLE: MicrosDurationU32 = MicrosDurationU32::millis(1);

const CYCLE_STEPS: u8 = 6;

/// Error from the peripherals the heater drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<B, X> {
    /// CAN send failed.
    Bus(B),
    /// Transceiver mode line failed.
    Transceiver(X),
}

/// One cabin heater on a single-wire CAN bus.
///
/// Owns the bus send handle, the transceiver mode line, the coolant
/// thermometer, the settle delay, and all protocol state. Drive it once per
/// 100 ms scheduler tick with [`set_power`](Self::set_power); received
/// telemetry arrives through the [`CanSink`] impl, which the transport
/// should register for [`TELEMETRY_ID`].
pub struct AmperaHeater<B, X, T, D> {
    bus: B,
    transceiver: X,
    thermometer: T,
    delay: D,
    controller: PiController,
    awake: bool,
    step: u8,
    reported_power: u16,
}

impl<B, X, T, D> AmperaHeater<B, X, T, D>
where
    B: CanBus,
    X: Transceiver,
    T: Thermometer,
    D: DelayUs<u32>,
{
    pub fn new(bus: B, transceiver: X, thermometer: T, delay: D) -> Self {
        Self {
            bus,
            transceiver,
            thermometer,
            delay,
            controller: PiController::new(0.0),
            awake: false,
            step: 0,
            reported_power: 0,
        }
    }

    /// Set the regulation target and run the PI loop once against the
    /// current sensor reading.
    ///
    /// Returns the computed demand in `[0, 6000]` watts. The demand is not
    /// forwarded to the command cycle; pass it to
    /// [`set_power`](Self::set_power) to close the loop. Call at the 100 Hz
    /// controller rate, once per tick.
    pub fn set_target_temperature(&mut self, target: Temperature) -> Result<u16, T::Error> {
        self.controller.set_target(target);
        let temp = self.thermometer.read()?;
        Ok(self.controller.run(temp))
    }

    /// Drive the command cycle for one tick.
    ///
    /// Zero power puts the heater to sleep and sends nothing; the next
    /// non-zero power runs the wake-up procedure and restarts the cycle at
    /// step 0. While awake, each call emits exactly one frame of the
    /// six-step cycle.
    pub fn set_power(&mut self, power: u16) -> Result<(), Error<B::Error, X::Error>> {
        if power == 0 {
            #[cfg(feature = "defmt")]
            if self.awake {
                defmt::debug!("heater commanded off");
            }
            self.awake = false;
            return Ok(());
        }

        if !self.awake {
            self.send_wakeup()?;
            self.awake = true;
            self.step = 0;
        }

        let frame = match self.step {
            0 => {
                // Re-assert normal mode at the start of every cycle.
                self.transceiver
                    .set_mode(Mode::Normal)
                    .map_err(Error::Transceiver)?;
                Frame::new(
                    KEEP_ALIVE_ID,
                    &[0x00, 0x52, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
                )
            }
            1 => Frame::new(0x1027_40CB, &[0x41, 0x00, 0x00]),
            2 => {
                let count = (power.min(MAX_POWER_W) / POWER_SCALE_W) as u8;
                Frame::new(COMMAND_ID, &[0x02, count, 0x00, 0x00, 0x00])
            }
            3 => Frame::new(
                0x102C_C040,
                &[0x01, 0x01, 0xCF, 0x18, 0x00, 0x51, 0x06, 0x6D],
            ),
            4 => Frame::new(0x13FF_E060, &[]),
            _ => Frame::new(0x1024_2040, &[0x02]),
        };

        self.bus.send(&frame).map_err(Error::Bus)?;
        self.step = (self.step + 1) % CYCLE_STEPS;
        Ok(())
    }

    /// Current coolant temperature.
    pub fn temperature(&mut self) -> Result<Temperature, T::Error> {
        self.thermometer.read()
    }

    /// Last power the heater reported over telemetry, in watts.
    ///
    /// Reflects decoded telemetry only, never the commanded power.
    pub fn power(&self) -> u16 {
        self.reported_power
    }

    pub fn is_awake(&self) -> bool {
        self.awake
    }

    /// Wake all SW-CAN devices: broadcast on 0x100 with the transceiver in
    /// high-voltage mode, then return to normal mode.
    fn send_wakeup(&mut self) -> Result<(), Error<B::Error, X::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("waking heater");

        self.transceiver
            .set_mode(Mode::HighVoltageWakeup)
            .map_err(Error::Transceiver)?;
        self.delay.delay_us(WAKE_SETTLE.to_micros());

        self.bus
            .send(&Frame::new(WAKEUP_ID, &[0x00; 8]))
            .map_err(Error::Bus)?;
        self.delay.delay_us(WAKE_SETTLE.to_micros());

        self.transceiver
            .set_mode(Mode::Normal)
            .map_err(Error::Transceiver)
    }
}

impl<B, X, T, D> CanSink for AmperaHeater<B, X, T, D> {
    fn interest(&self) -> u32 {
        TELEMETRY_ID
    }

    fn on_frame(&mut self, frame: &Frame) {
        // The transport should only route our telemetry here; drop anything
        // else, including frames too short to carry the power byte.
        if frame.id() != TELEMETRY_ID || frame.dlc() < 2 {
            return;
        }

        self.reported_power = u16::from(frame.data()[1]) * POWER_SCALE_W;

        #[cfg(feature = "defmt")]
        defmt::trace!("heater reports {} W", self.reported_power);
    }
}
