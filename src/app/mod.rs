//! Application boundary — port traits and outbound events.
//!
//! The acquisition logic in [`crate::pipeline`] and [`crate::scheduler`]
//! talks to the outside world only through the traits in [`ports`],
//! keeping it fully testable without real peripherals.

pub mod events;
pub mod ports;
