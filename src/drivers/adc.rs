//! Sensor ADC driver.
//!
//! Starts a conversion on the sensor channel and, on completion, scales
//! the result to the configured resolution and publishes it to
//! [`SAMPLE_LATCH`](crate::sensors::SAMPLE_LATCH).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: arms the conversion timer in hw_init; its callback reads
//! ADC1 and calls [`complete_conversion`].
//! On host/test: completes immediately from a static `AtomicU16` for
//! injection.

use core::sync::atomic::{AtomicU8, AtomicU16, Ordering};

use log::warn;

use crate::app::ports::ConversionPort;
use crate::pins::ADC_NATIVE_BITS;
use crate::sensors;

static SIM_SENSOR_ADC: AtomicU16 = AtomicU16::new(0);

/// Right shift applied to native readings.  Written by [`OneShotAdc::new`],
/// read from the completion context.
static RESOLUTION_SHIFT: AtomicU8 = AtomicU8::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_sensor_adc(raw: u16) {
    SIM_SENSOR_ADC.store(raw, Ordering::Relaxed);
}

/// Scale a native reading and hand it to the sample latch.  A failed read
/// is logged and leaves the latch untouched; the next request retries.
/// Returns whether a sample was latched.
pub fn complete_conversion(read: Result<u16, i32>) -> bool {
    match read {
        Ok(native) => {
            let shift = RESOLUTION_SHIFT.load(Ordering::Relaxed);
            sensors::latch_from_isr(native >> shift);
            true
        }
        Err(rc) => {
            warn!("adc: conversion failed (rc={}), sample dropped", rc);
            false
        }
    }
}

/// Oneshot converter on the sensor channel.
pub struct OneShotAdc {
    bits: u8,
    requests: u32,
}

impl OneShotAdc {
    /// `bits` is the resolution the pipeline expects.  Readings from the
    /// native converter are truncated down to it; a wider request is
    /// passed through unscaled.
    pub fn new(bits: u8) -> Self {
        RESOLUTION_SHIFT.store(ADC_NATIVE_BITS.saturating_sub(bits), Ordering::Relaxed);
        Self { bits, requests: 0 }
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Conversions requested since construction.
    pub fn requests(&self) -> u32 {
        self.requests
    }

    #[cfg(target_os = "espidf")]
    fn trigger(&self) {
        crate::drivers::hw_init::trigger_conversion();
    }

    #[cfg(not(target_os = "espidf"))]
    fn trigger(&self) {
        complete_conversion(Ok(SIM_SENSOR_ADC.load(Ordering::Relaxed)));
    }
}

impl ConversionPort for OneShotAdc {
    fn start_conversion(&mut self) {
        self.requests = self.requests.wrapping_add(1);
        self.trigger();
    }
}
