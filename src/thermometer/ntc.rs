//! NTC coolant thermistor interpretation.
//!
//! The heater's coolant sensor is an NTC thermistor (about 3.2 kΩ at 21 °C)
//! on a resistor divider, so a higher raw sample means a colder sensor. The
//! calibration table maps raw sample thresholds to 5 °C steps starting at
//! 0 °C; readings between thresholds are interpolated linearly and readings
//! off either end saturate.

use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};
use static_assertions::const_assert;

use super::{Temperature, Thermometer};

/// Raw sample thresholds, coldest (highest resistance) first.
const LUT: [u16; 17] = [
    2950, 2600, 2330, 2070, 1850, 1650, 1470, 1280, 1120, 960, 830, 710, 615, 520, 440, 370, 300,
];

/// Temperature at or above the first threshold.
const MIN_TEMP: Temperature = 0.0;
/// Temperature below the last threshold.
const MAX_TEMP: Temperature = 80.0;
/// Degrees Celsius per table row.
const STEP: Temperature = 5.0;

const fn strictly_descending(lut: &[u16]) -> bool {
    let mut i = 1;
    while i < lut.len() {
        if lut[i] >= lut[i - 1] {
            return false;
        }
        i += 1;
    }
    true
}

// Equal adjacent thresholds would make the interpolation divisor zero.
const_assert!(strictly_descending(&LUT));

/// Convert a raw ADC sample to degrees Celsius.
///
/// Scans the table from the cold end: samples at or above the first
/// threshold read 0 °C, samples below the last threshold read 80 °C, and
/// anything in between interpolates within its 5 °C bracket.
pub fn interpret(raw: u16) -> Temperature {
    let mut last = 0;

    for (i, &cur) in LUT.iter().enumerate() {
        if cur <= raw {
            // Off the cold end of the table.
            if i == 0 {
                return MIN_TEMP;
            }

            let frac = f32::from(raw - cur) / f32::from(last - cur);
            return (i as f32) * STEP - STEP * frac;
        }
        last = cur;
    }

    // Below the lowest calibrated threshold: hotter than the table covers.
    MAX_TEMP
}

/// Thermistor sampled through a one-shot ADC channel.
pub struct NtcThermometer<A, ADC, PIN> {
    adc: A,
    pin: PIN,
    _adc: PhantomData<ADC>,
}

impl<A, ADC, PIN> NtcThermometer<A, ADC, PIN>
where
    A: OneShot<ADC, u16, PIN>,
    PIN: Channel<ADC>,
{
    pub fn new(adc: A, pin: PIN) -> Self {
        Self {
            adc,
            pin,
            _adc: PhantomData,
        }
    }
}

impl<A, ADC, PIN> Thermometer for NtcThermometer<A, ADC, PIN>
where
    A: OneShot<ADC, u16, PIN>,
    PIN: Channel<ADC>,
{
    type Error = A::Error;

    fn read(&mut self) -> Result<Temperature, Self::Error> {
        let raw = nb::block!(self.adc.read(&mut self.pin))?;
        Ok(interpret(raw))
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use super::*;

    #[test]
    fn saturates_at_cold_end() {
        assert_eq!(interpret(2950), 0.0);
        assert_eq!(interpret(4095), 0.0);
    }

    #[test]
    fn saturates_at_hot_end() {
        assert_eq!(interpret(299), 80.0);
        assert_eq!(interpret(250), 80.0);
        assert_eq!(interpret(0), 80.0);
    }

    #[test]
    fn last_threshold_reads_table_maximum() {
        assert_eq!(interpret(300), 80.0);
    }

    #[test]
    fn interpolates_within_brackets() {
        // Halfway between 2950 (0 °C) and 2600 (5 °C).
        let t = interpret(2775);
        assert!((t - 2.5).abs() < 0.01);

        // Inside the hottest bracket.
        let t = interpret(310);
        assert!(t > 75.0 && t < 80.0);
    }

    #[test]
    fn monotone_non_increasing() {
        let mut prev = interpret(200);
        for raw in 201..=3100 {
            let t = interpret(raw);
            assert!(t <= prev, "not monotone at raw {raw}");
            prev = t;
        }
    }

    struct TestAdc {
        raw: u16,
    }

    struct TestPin;

    impl Channel<TestAdc> for TestPin {
        type ID = u8;

        fn channel() -> Self::ID {
            0
        }
    }

    impl OneShot<TestAdc, u16, TestPin> for TestAdc {
        type Error = Infallible;

        fn read(&mut self, _pin: &mut TestPin) -> nb::Result<u16, Self::Error> {
            Ok(self.raw)
        }
    }

    #[test]
    fn reads_through_the_adc_seam() {
        let mut therm = NtcThermometer::new(TestAdc { raw: 2950 }, TestPin);
        assert_eq!(therm.read().unwrap(), 0.0);
    }
}
