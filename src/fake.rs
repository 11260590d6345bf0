//! Fake peripherals for testing.
//!
//! All fakes record into one shared event log so tests can assert the exact
//! interleaving of sent frames, transceiver mode changes, and settle delays.

use core::{cell::RefCell, convert::Infallible};

use embedded_hal::blocking::delay::DelayUs;

use crate::{
    can::{CanBus, Frame},
    transceiver::{Mode, Transceiver},
};

/// One observable action on the fake peripherals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Sent(Frame),
    Mode(Mode),
    Delay(u32),
}

pub type EventLog = RefCell<heapless::Vec<Event, 64>>;

fn record(log: &EventLog, event: Event) {
    if log.borrow_mut().push(event).is_err() {
        panic!("event log overflow");
    }
}

/// Fake CAN bus that records every sent frame.
pub struct FakeBus<'a> {
    log: &'a EventLog,
}

impl<'a> FakeBus<'a> {
    pub fn new(log: &'a EventLog) -> Self {
        Self { log }
    }
}

impl CanBus for FakeBus<'_> {
    type Error = Infallible;

    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        record(self.log, Event::Sent(*frame));
        Ok(())
    }
}

/// Fake transceiver that records mode changes.
pub struct FakeTransceiver<'a> {
    log: &'a EventLog,
}

impl<'a> FakeTransceiver<'a> {
    pub fn new(log: &'a EventLog) -> Self {
        Self { log }
    }
}

impl Transceiver for FakeTransceiver<'_> {
    type Error = Infallible;

    fn set_mode(&mut self, mode: Mode) -> Result<(), Self::Error> {
        record(self.log, Event::Mode(mode));
        Ok(())
    }
}

/// Fake delay that records the requested time without waiting.
pub struct FakeDelay<'a> {
    log: &'a EventLog,
}

impl<'a> FakeDelay<'a> {
    pub fn new(log: &'a EventLog) -> Self {
        Self { log }
    }
}

impl DelayUs<u32> for FakeDelay<'_> {
    fn delay_us(&mut self, us: u32) {
        record(self.log, Event::Delay(us));
    }
}
