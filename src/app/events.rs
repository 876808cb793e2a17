//! Outbound application events.
//!
//! The [`Scheduler`](crate::scheduler::Scheduler) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, record in a test, etc.

use serde::Serialize;

use crate::config::DEVICE_ID_LEN;
use crate::pipeline::measurement_log::MeasurementRecord;
use crate::pipeline::status::STATUS_TEXT_LEN;

/// Structured events emitted by the acquisition loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The scheduler has started.
    Started {
        device_id: heapless::String<DEVICE_ID_LEN>,
        interval_ms: u16,
    },

    /// A sample crossed the threshold and was forwarded.
    SampleAccepted {
        raw: u16,
        calibrated: u32,
        mapped: u16,
        uptime: u32,
    },

    /// A sample was at or below the threshold.
    SampleRejected {
        raw: u16,
        calibrated: u32,
        error_count: u32,
    },

    /// Status bit 0 changed.
    ActivityChanged { active: bool },

    /// A status line was rendered.
    StatusReported(heapless::String<STATUS_TEXT_LEN>),

    /// The derived temperature did not fit two digits and was clamped.
    TemperatureClamped { temperature: i32 },

    /// Periodic snapshot, emitted alongside each status line.
    Telemetry(TelemetryData),
}

/// A point-in-time pipeline snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TelemetryData {
    pub uptime: u32,
    pub status_flags: u8,
    pub error_count: u32,
    pub temperature: i32,
    /// Slot 0 of the history ring.
    pub history_newest: u8,
    /// Most recent measurement log record.
    pub latest: Option<MeasurementRecord>,
    /// Occupied measurement log slots.
    pub logged: u8,
}
