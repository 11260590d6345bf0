//! CAN transport seams.
//!
//! The generic transport (peripheral setup, filtering, receive dispatch)
//! lives with the application. This module defines only the surface the
//! heater needs: a send handle and a listener interface the transport
//! dispatches matching frames to.

/// Maximum CAN payload length.
pub const MAX_DLC: usize = 8;

/// A classic CAN data frame.
///
/// Arbitration IDs above `0x7FF` are 29-bit extended IDs; the transport is
/// expected to set the IDE bit accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    id: u32,
    data: [u8; MAX_DLC],
    dlc: u8,
}

impl Frame {
    /// Build a frame from up to [`MAX_DLC`] payload bytes.
    ///
    /// # Panics
    ///
    /// Panics if `data` is longer than [`MAX_DLC`].
    pub const fn new(id: u32, data: &[u8]) -> Self {
        assert!(data.len() <= MAX_DLC);

        let mut buf = [0; MAX_DLC];
        let mut i = 0;
        while i < data.len() {
            buf[i] = data[i];
            i += 1;
        }

        Self {
            id,
            data: buf,
            dlc: data.len() as u8,
        }
    }

    /// Arbitration ID.
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Payload bytes, `dlc` long. Empty for zero-length frames.
    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlc as usize]
    }

    /// Declared payload length, 0 to 8.
    pub const fn dlc(&self) -> u8 {
        self.dlc
    }
}

/// Send handle onto the CAN bus.
pub trait CanBus {
    type Error;

    /// Queue a single frame for transmission.
    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// A listener the transport delivers received frames to.
///
/// The transport holds its registered listeners as a map from arbitration
/// ID of interest to listener and routes each received frame accordingly.
/// Listeners must tolerate misrouted frames.
pub trait CanSink {
    /// Arbitration ID this listener wants delivered.
    fn interest(&self) -> u32;

    /// Called from the receive path for each matching frame.
    fn on_frame(&mut self, frame: &Frame);
}
