//! Main acquisition loop.
//!
//! One logical thread of control, preempted only by the conversion
//! interrupt.  Each iteration:
//!
//! ```text
//!   ready flag seen? ── take → pipeline → uptime += 1 → status gate
//!
//!   then, every pass: start_conversion() · indicator pulse (while
//!   active) · delay(interval)
//! ```
//!
//! Processing is gated strictly on the ready flag.  An iteration that
//! finds no fresh sample does no pipeline work and leaves uptime alone.
//! A conversion is requested on every pass, so a request that never
//! completes costs one iteration; converters coalesce a request made
//! while one is still in flight.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, HardwarePort};
use crate::config::{DEVICE_ID_LEN, SystemConfig, fixed_str};
use crate::pipeline::status::ReportOutcome;
use crate::pipeline::{PipelineState, SampleOutcome};
use crate::sensors::SampleLatch;

/// Conversion bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No conversion outstanding.
    Idle,
    /// A conversion was requested and its result not yet consumed.
    AwaitingSample,
}

/// Everything one [`Scheduler::run_once`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iteration {
    /// Sample consumed this iteration, if any.
    pub sample: Option<SampleOutcome>,
    /// Status reporter result; `Skipped` when no sample was consumed.
    pub report: ReportOutcome,
    /// The request re-issued one that had not completed by this pass.
    pub retried: bool,
    /// The indicator was pulsed.
    pub pulsed: bool,
}

pub struct Scheduler {
    pipeline: PipelineState,
    state: LoopState,
    uptime: u32,
    interval_ms: u32,
    pulse_ms: u32,
    device_id: heapless::String<DEVICE_ID_LEN>,
}

impl Scheduler {
    /// Build the loop and all pipeline state.  The interval is taken as-is;
    /// apply [`SystemConfig::apply_startup_overrides`] beforehand.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            pipeline: PipelineState::new(config),
            state: LoopState::Idle,
            uptime: 0,
            interval_ms: u32::from(config.device.interval_ms),
            pulse_ms: config.indicator_pulse_ms,
            device_id: config.device.id.clone(),
        }
    }

    /// Announce startup and render the initial status line (uptime 0).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        info!(
            "Scheduler: started (id={}, interval={}ms)",
            self.device_id, self.interval_ms
        );
        sink.emit(&AppEvent::Started {
            device_id: self.device_id.clone(),
            interval_ms: self.interval_ms as u16,
        });
        self.report(sink);
    }

    /// One pass of the main loop.
    pub fn run_once(
        &mut self,
        latch: &SampleLatch,
        hw: &mut impl HardwarePort,
        sink: &mut impl EventSink,
    ) -> Iteration {
        // 1. Drain the hand-off.
        let mut sample = None;
        let mut report = ReportOutcome::Skipped;
        if let Some(raw) = latch.take() {
            self.state = LoopState::Idle;
            let was_active = self.pipeline.is_active();

            let outcome = self.pipeline.process(raw, self.uptime);
            emit_sample(&outcome, self.uptime, sink);
            self.uptime = self.uptime.wrapping_add(1);

            let active = self.pipeline.is_active();
            if active != was_active {
                sink.emit(&AppEvent::ActivityChanged { active });
            }

            report = self.report(sink);
            sample = Some(outcome);
        }

        // 2. Kick off the next conversion.
        let retried = self.state == LoopState::AwaitingSample;
        if retried {
            debug!("Scheduler: no sample since last request, re-requesting");
        }
        hw.start_conversion();
        self.state = LoopState::AwaitingSample;

        // 3. Indicator blink while above threshold.
        let pulsed = self.pipeline.is_active();
        if pulsed {
            hw.set_indicator(true);
            hw.delay_ms(self.pulse_ms);
            hw.set_indicator(false);
        }

        // 4. Pace.
        hw.delay_ms(self.interval_ms);

        Iteration {
            sample,
            report,
            retried,
            pulsed,
        }
    }

    /// Run forever.
    pub fn run(
        &mut self,
        latch: &SampleLatch,
        hw: &mut impl HardwarePort,
        sink: &mut impl EventSink,
    ) -> ! {
        info!("Scheduler: entering main loop");
        loop {
            self.run_once(latch, hw, sink);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn uptime(&self) -> u32 {
        self.uptime
    }

    pub fn pipeline(&self) -> &PipelineState {
        &self.pipeline
    }

    // ── Internal ──────────────────────────────────────────────

    fn report(&mut self, sink: &mut impl EventSink) -> ReportOutcome {
        let outcome = self.pipeline.report_status(self.uptime);
        match outcome {
            ReportOutcome::Skipped => return outcome,
            ReportOutcome::Rendered => {}
            ReportOutcome::Clamped { temperature } => {
                warn!("Status: temperature {} outside 0..=99, clamped", temperature);
                sink.emit(&AppEvent::TemperatureClamped { temperature });
            }
        }

        let text = fixed_str(self.pipeline.status_message().as_str());
        sink.emit(&AppEvent::StatusReported(text));
        sink.emit(&AppEvent::Telemetry(self.pipeline.telemetry(self.uptime)));
        outcome
    }
}

fn emit_sample(outcome: &SampleOutcome, uptime: u32, sink: &mut impl EventSink) {
    let event = match *outcome {
        SampleOutcome::Accepted {
            raw,
            calibrated,
            mapped,
            ..
        } => AppEvent::SampleAccepted {
            raw,
            calibrated,
            mapped,
            uptime,
        },
        SampleOutcome::Rejected {
            raw,
            calibrated,
            error_count,
        } => AppEvent::SampleRejected {
            raw,
            calibrated,
            error_count,
        },
    };
    sink.emit(&event);
}
