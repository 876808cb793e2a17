//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC on the board, whatever `log` backend the
//! host installs otherwise).

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self { emitted: 0 }
    }

    /// Events handled since construction.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        self.emitted = self.emitted.wrapping_add(1);
        match event {
            AppEvent::Started { device_id, interval_ms } => {
                info!("START | id={} interval={}ms", device_id, interval_ms);
            }
            AppEvent::SampleAccepted { raw, calibrated, mapped, uptime } => {
                debug!(
                    "SAMPLE | raw={} cal={} -> mapped={} @{}",
                    raw, calibrated, mapped, uptime
                );
            }
            AppEvent::SampleRejected { raw, calibrated, error_count } => {
                debug!(
                    "SAMPLE | raw={} cal={} below threshold (errors={})",
                    raw, calibrated, error_count
                );
            }
            AppEvent::ActivityChanged { active } => {
                info!("ACTIVE | {}", if *active { "ON" } else { "OFF" });
            }
            AppEvent::StatusReported(text) => {
                info!("STATUS | {}", text);
            }
            AppEvent::TemperatureClamped { temperature } => {
                warn!("STATUS | temperature {} clamped to two digits", temperature);
            }
            AppEvent::Telemetry(t) => match serde_json::to_string(t) {
                Ok(json) => info!("TELEM | {}", json),
                Err(e) => warn!("TELEM | encode failed: {}", e),
            },
        }
    }
}
