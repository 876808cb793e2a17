//! Acquisition pipeline — everything downstream of the sample latch.
//!
//! ```text
//!  raw ──▶ Calibration ──▶ ThresholdEvaluator ──┬──▶ HistoryRing
//!                              │  (active only) └──▶ MeasurementLog
//!                              ▼
//!                      flags / error count ──▶ StatusReporter
//! ```
//!
//! [`PipelineState`] bundles every stage and all of their state.  It is
//! created once from [`SystemConfig`] and owned by the scheduler; nothing
//! in here is reachable from interrupt context.

pub mod history;
pub mod measurement_log;
pub mod status;
pub mod threshold;

use log::debug;

use crate::app::events::TelemetryData;
use crate::config::{DEVICE_NAME_LEN, SystemConfig};
use crate::sensors::Calibration;
use history::HistoryRing;
use measurement_log::{MeasurementLog, MeasurementRecord};
use status::{ReportOutcome, StatusMessage, StatusReporter, derive_temperature};
use threshold::{Classification, ThresholdEvaluator};

/// What happened to one consumed sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Above threshold: forwarded into history and log.
    Accepted {
        raw: u16,
        calibrated: u32,
        mapped: u16,
        record: MeasurementRecord,
    },
    /// At or below threshold: only flags and the error counter moved.
    Rejected {
        raw: u16,
        calibrated: u32,
        error_count: u32,
    },
}

impl SampleOutcome {
    pub fn calibrated(&self) -> u32 {
        match *self {
            Self::Accepted { calibrated, .. } | Self::Rejected { calibrated, .. } => calibrated,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

pub struct PipelineState {
    calibration: Calibration,
    evaluator: ThresholdEvaluator,
    history: HistoryRing,
    log: MeasurementLog,
    reporter: StatusReporter,
    device_name: heapless::String<DEVICE_NAME_LEN>,
    /// Derived from the last accepted sample; 0 until one arrives.
    temperature: i32,
}

impl PipelineState {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            calibration: Calibration::new(config.calibration_factor),
            evaluator: ThresholdEvaluator::new(
                config.sensor_threshold,
                config.lookup_table,
                config.initial_status_flags,
            ),
            history: HistoryRing::new(),
            log: MeasurementLog::new(config.sensor_threshold),
            reporter: StatusReporter::new(config.status_period),
            device_name: config.device_name.clone(),
            temperature: 0,
        }
    }

    /// Run one raw sample through calibration, classification and, when
    /// active, the history ring and measurement log.  `uptime` is the
    /// counter value before this sample is accounted for.
    pub fn process(&mut self, raw: u16, uptime: u32) -> SampleOutcome {
        let calibrated = self.calibration.calibrate(raw);

        match self.evaluator.evaluate(calibrated) {
            Classification::Active { index, mapped } => {
                self.history.push(mapped);
                let record = self.log.append(mapped, uptime);
                self.temperature = derive_temperature(calibrated);
                debug!(
                    "pipeline: raw={} cal={} bucket={} mapped={} temp={}",
                    raw, calibrated, index, mapped, self.temperature
                );
                SampleOutcome::Accepted {
                    raw,
                    calibrated,
                    mapped,
                    record,
                }
            }
            Classification::Inactive => {
                let error_count = self.evaluator.error_count();
                debug!(
                    "pipeline: raw={} cal={} below threshold (errors={})",
                    raw, calibrated, error_count
                );
                SampleOutcome::Rejected {
                    raw,
                    calibrated,
                    error_count,
                }
            }
        }
    }

    /// Render the status line if `uptime` is on the reporting period.
    pub fn report_status(&mut self, uptime: u32) -> ReportOutcome {
        self.reporter
            .report(uptime, self.temperature, self.device_name.as_str())
    }

    pub fn telemetry(&self, uptime: u32) -> TelemetryData {
        TelemetryData {
            uptime,
            status_flags: self.evaluator.flags(),
            error_count: self.evaluator.error_count(),
            temperature: self.temperature,
            history_newest: self.history.newest().unwrap_or(0),
            latest: self.log.latest().copied(),
            logged: self.log.len() as u8,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.evaluator.is_active()
    }

    pub fn status_flags(&self) -> u8 {
        self.evaluator.flags()
    }

    pub fn error_count(&self) -> u32 {
        self.evaluator.error_count()
    }

    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    pub fn history(&self) -> &HistoryRing {
        &self.history
    }

    pub fn log(&self) -> &MeasurementLog {
        &self.log
    }

    pub fn status_message(&self) -> &StatusMessage {
        self.reporter.message()
    }
}
