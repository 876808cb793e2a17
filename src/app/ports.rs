//! Port traits — the boundary between the acquisition loop and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Scheduler / PipelineState (domain)
//! ```
//!
//! Driven adapters (converter, indicator, delay, event sinks) implement
//! these traits.  The [`Scheduler`](crate::scheduler::Scheduler) consumes
//! them via generics, so the domain core never touches hardware directly.

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Conversion port (driven adapter: domain → ADC)
// ───────────────────────────────────────────────────────────────

/// Starts an analog conversion.
///
/// Completion is reported asynchronously: the implementation delivers the
/// result into a [`SampleLatch`](crate::sensors::SampleLatch) from its
/// interrupt (or interrupt-like) context.  Requesting a conversion while
/// one is in flight is allowed and must not produce two results.
pub trait ConversionPort {
    fn start_conversion(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Hardware port (the whole board as the scheduler sees it)
// ───────────────────────────────────────────────────────────────

/// Everything the scheduler asks of the platform.
pub trait HardwarePort {
    /// Begin an asynchronous analog sample.
    fn start_conversion(&mut self);

    /// Drive the threshold indicator.
    fn set_indicator(&mut self, on: bool);

    /// Blocking wait.
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
