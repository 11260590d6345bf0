//! Controller producing a heater power demand from a temperature error.

use crate::thermometer::Temperature;

pub mod pi;

pub trait Controller {
    /// Set the target temperature in degrees Celsius
    fn set_target(&mut self, target: Temperature);

    /// Get the target temperature in degrees Celsius
    fn get_target(&self) -> Temperature;

    /// Run the controller for a single tick.
    ///
    /// Returns the heating power demand in watts. Each call mutates the
    /// controller's internal state exactly once; the caller must hold the
    /// rate the controller was configured for or it will over-integrate.
    fn run(&mut self, temp: Temperature) -> u16;
}
