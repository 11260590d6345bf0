//! Driver for the Ampera/Eberspächer high-voltage cabin heater on
//! single-wire CAN.
//!
//! The crate owns the heater-specific behavior only: the wake and
//! keep-alive protocol and telemetry decoding ([`heater`]), thermistor
//! interpretation ([`thermometer::ntc`]), and the PI thermal regulator
//! ([`controller`]). CAN transport, scheduling, and hardware bring-up stay
//! with the application, behind the traits in [`can`], [`transceiver`], and
//! [`thermometer`].

#![cfg_attr(not(test), no_std)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

pub mod can;
pub mod controller;
#[cfg(any(test, feature = "fake"))]
pub mod fake;
pub mod heater;
pub mod thermometer;
pub mod transceiver;

pub use crate::heater::AmperaHeater;
