//! Hardware adapter — bridges board peripherals to the domain port traits.
//!
//! Combines a converter, the indicator pin and a delay provider behind
//! [`HardwarePort`].  Generic over the pieces so the same adapter drives
//! the ESP32 drivers in production and the threaded simulator on host.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{ConversionPort, HardwarePort};

/// Concrete adapter that combines all hardware behind [`HardwarePort`].
pub struct HardwareAdapter<C, P, D> {
    adc: C,
    indicator: P,
    delay: D,
}

impl<C, P, D> HardwareAdapter<C, P, D>
where
    C: ConversionPort,
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(adc: C, indicator: P, delay: D) -> Self {
        Self { adc, indicator, delay }
    }

    pub fn adc(&self) -> &C {
        &self.adc
    }

    pub fn into_parts(self) -> (C, P, D) {
        (self.adc, self.indicator, self.delay)
    }
}

// ── HardwarePort implementation ───────────────────────────────

impl<C, P, D> HardwarePort for HardwareAdapter<C, P, D>
where
    C: ConversionPort,
    P: OutputPin,
    D: DelayNs,
{
    fn start_conversion(&mut self) {
        self.adc.start_conversion();
    }

    fn set_indicator(&mut self, on: bool) {
        let res = if on {
            self.indicator.set_high()
        } else {
            self.indicator.set_low()
        };
        if let Err(e) = res {
            warn!("Indicator write failed: {:?}", e);
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
