//! System configuration parameters
//!
//! Every tunable the acquisition pipeline reads.  Values are fixed at build
//! time through [`SystemConfig::default`]; the only runtime change is the
//! one-shot loop interval override applied at startup.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Length of the device identity field in the status message.
pub const DEVICE_NAME_LEN: usize = 15;

/// Length of the short device id.
pub const DEVICE_ID_LEN: usize = 4;

/// Number of entries in the activation lookup table.
pub const LOOKUP_TABLE_LEN: usize = 8;

/// Per-device operating parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Operating mode.  Carried for the host application; the pipeline
    /// does not branch on it.
    pub mode: u8,
    /// Main loop pacing delay (milliseconds).
    pub interval_ms: u16,
    /// Short device name.
    pub id: heapless::String<DEVICE_ID_LEN>,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub device: DeviceConfig,
    /// Replaces `device.interval_ms` once at startup when set.
    pub startup_interval_ms: Option<u16>,

    // --- Identity ---
    /// Device identity written at the head of every status message.
    pub device_name: heapless::String<DEVICE_NAME_LEN>,

    // --- Acquisition ---
    /// Effective converter resolution in bits (raw samples are `< 2^bits`).
    pub adc_bits: u8,
    /// Raw → engineering-unit scale factor.
    pub calibration_factor: f32,

    // --- Classification ---
    /// Calibrated values strictly above this are "active".
    pub sensor_threshold: u32,
    /// Values forwarded downstream, indexed by `(calibrated / 100) % 8`.
    pub lookup_table: [u16; LOOKUP_TABLE_LEN],
    /// Status flag byte at power-on.  Only bit 0 is owned by the pipeline.
    pub initial_status_flags: u8,

    // --- Timing ---
    /// Indicator on-time per blink (milliseconds).
    pub indicator_pulse_ms: u32,
    /// A status message is rendered whenever `uptime % status_period == 0`.
    pub status_period: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            mode: 1,
            interval_ms: 1000,
            id: fixed_str("SYS"),
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            startup_interval_ms: Some(500),

            device_name: fixed_str("ATmega328P_v1.0"),

            adc_bits: 10,
            calibration_factor: 1.023,

            sensor_threshold: 500,
            lookup_table: [100, 200, 300, 400, 500, 600, 700, 800],
            initial_status_flags: 0x55,

            indicator_pulse_ms: 100,
            status_period: 10,
        }
    }
}

impl SystemConfig {
    /// Largest raw sample the converter can produce.
    pub fn adc_max(&self) -> u16 {
        if self.adc_bits >= 16 {
            u16::MAX
        } else {
            (1u16 << self.adc_bits) - 1
        }
    }

    /// Reject values that would break pipeline invariants.
    pub fn validate(&self) -> Result<()> {
        if !self.calibration_factor.is_finite() || self.calibration_factor <= 0.0 {
            return Err(Error::Config("calibration_factor must be finite and positive"));
        }
        if self.adc_bits == 0 || self.adc_bits > 16 {
            return Err(Error::Config("adc_bits must be within 1..=16"));
        }
        // Calibrated values are u32; the full-scale product must fit.
        if f64::from(self.adc_max()) * f64::from(self.calibration_factor) > f64::from(u32::MAX) {
            return Err(Error::Config("calibration_factor overflows calibrated range"));
        }
        if self.device.interval_ms == 0 || self.startup_interval_ms == Some(0) {
            return Err(Error::Config("loop interval must be non-zero"));
        }
        if self.status_period == 0 {
            return Err(Error::Config("status_period must be non-zero"));
        }
        if !self.device_name.is_ascii() {
            return Err(Error::Config("device_name must be ASCII"));
        }
        if !self.device.id.is_ascii() {
            return Err(Error::Config("device id must be ASCII"));
        }
        Ok(())
    }

    /// Apply the one-time startup override of the loop interval.
    /// Returns `true` if the interval changed.
    pub fn apply_startup_overrides(&mut self) -> bool {
        match self.startup_interval_ms.take() {
            Some(ms) if ms != self.device.interval_ms => {
                self.device.interval_ms = ms;
                true
            }
            _ => false,
        }
    }
}

/// Build a fixed-capacity string, truncating at `N` bytes.
pub fn fixed_str<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
