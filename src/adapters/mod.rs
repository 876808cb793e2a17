//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements     | Connects to                     |
//! |------------|----------------|---------------------------------|
//! | `hardware` | HardwarePort   | converter, indicator pin, delay |
//! | `log_sink` | EventSink      | Serial log output               |
//! | `sim`      | ConversionPort | Worker thread (host only)       |
//! |            | DelayNs        | `thread::sleep` (host only)     |

pub mod hardware;
pub mod log_sink;
#[cfg(not(target_os = "espidf"))]
pub mod sim;

