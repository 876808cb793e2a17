//! Threshold indicator output.
//!
//! A single digital output (the first mapped output pin) exposed as an
//! [`embedded_hal::digital::OutputPin`].
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the pin via hw_init.
//! On host/test: tracks the level in-memory only.

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin, StatefulOutputPin};

use crate::drivers::hw_init;

/// A failed level write, carrying the driver status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError(pub i32);

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct GpioOutput {
    pin: i32,
    high: bool,
    toggles: u32,
}

impl GpioOutput {
    /// The pin must already be configured as an output by
    /// [`hw_init::init_peripherals`].
    pub fn new(pin: i32) -> Self {
        Self { pin, high: false, toggles: 0 }
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }

    /// Low-to-high transitions since construction.
    pub fn pulses(&self) -> u32 {
        self.toggles
    }

    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        hw_init::gpio_write(self.pin, high).map_err(GpioError)?;
        if high && !self.high {
            self.toggles = self.toggles.wrapping_add(1);
        }
        self.high = high;
        Ok(())
    }
}

impl ErrorType for GpioOutput {
    type Error = GpioError;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

impl StatefulOutputPin for GpioOutput {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}
