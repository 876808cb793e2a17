//! Sensor subsystem — the interrupt hand-off and the calibration stage.
//!
//! ```text
//!  ADC complete ISR ──▶ SampleLatch ──▶ Scheduler ──▶ Calibration
//!   (async context)    (one atomic word)  (main loop)
//! ```

pub mod calibration;
pub mod latch;

pub use calibration::Calibration;
pub use latch::SampleLatch;

/// Process-wide latch written by the ADC conversion-complete interrupt.
///
/// On hardware there is exactly one converter and one handler, so the
/// hand-off lives in a static the ISR can reach.  Host tests and the
/// simulator construct their own latches instead.
pub static SAMPLE_LATCH: SampleLatch = SampleLatch::new();

/// Record a finished conversion into [`SAMPLE_LATCH`].
/// Lock-free — safe to call from interrupt context.
pub fn latch_from_isr(raw: u16) {
    SAMPLE_LATCH.on_conversion_complete(raw);
}
