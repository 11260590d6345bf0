//! Temperature sensor interface

pub mod ntc;

/// Temperature in degrees Celsius.
pub type Temperature = f32;

pub trait Thermometer {
    type Error;

    /// Read the temperature in degrees Celsius
    fn read(&mut self) -> Result<Temperature, Self::Error>;
}

/// Fake thermometer for testing
#[cfg(any(test, feature = "fake"))]
pub mod fake {
    use core::convert::Infallible;

    use super::{Temperature, Thermometer};

    /// A fake thermometer that always returns the same temperature
    pub struct FakeThermometer {
        temp: Temperature,
    }

    impl FakeThermometer {
        pub fn new(temp: impl Into<Temperature>) -> Self {
            Self { temp: temp.into() }
        }

        /// Get the current temperature
        pub fn temp(&self) -> Temperature {
            self.temp
        }
        /// Get a mutable reference to the current temperature
        pub fn temp_mut(&mut self) -> &mut Temperature {
            &mut self.temp
        }
    }

    impl Thermometer for FakeThermometer {
        type Error = Infallible;

        fn read(&mut self) -> Result<Temperature, Self::Error> {
            Ok(self.temp)
        }
    }
}
