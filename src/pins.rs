//! GPIO / peripheral pin assignments for the sensor board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Analog input (ADC1)
// ---------------------------------------------------------------------------

/// Sensor input — ADC1 channel 0.
pub const SENSOR_ADC_CHANNEL: u32 = 0;

/// Hardware resolution of the converter (12-bit on ESP32 ADC1).
pub const ADC_NATIVE_BITS: u8 = 12;

// ---------------------------------------------------------------------------
// Digital outputs
// ---------------------------------------------------------------------------

/// Every mapped output pin.  All of them are driven as outputs at boot.
pub const OUTPUT_PINS: [i32; 4] = [2, 3, 4, 5];

/// Threshold indicator LED (active HIGH).  First entry of [`OUTPUT_PINS`].
pub const INDICATOR_GPIO: i32 = OUTPUT_PINS[0];
