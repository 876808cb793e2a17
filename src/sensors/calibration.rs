//! Raw ADC → engineering-unit conversion.
//!
//! A single multiplicative scale factor.  The product is truncated toward
//! zero, and calibrated values are `u32` so any validated factor applied
//! to a full-scale 16-bit sample fits without wrapping.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    factor: f32,
}

impl Calibration {
    pub const fn new(factor: f32) -> Self {
        Self { factor }
    }

    /// Scale a raw reading.  Pure; float-to-int conversion saturates.
    #[inline]
    pub fn calibrate(&self, raw: u16) -> u32 {
        (f32::from(raw) * self.factor) as u32
    }
}
