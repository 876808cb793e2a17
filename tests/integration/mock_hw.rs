//! Mock board and event sink for integration tests.
//!
//! Records every hardware call so tests can assert on the full command
//! history without touching real ADC/GPIO registers.  Conversions complete
//! synchronously: `start_conversion` latches the next queued sample.

use std::collections::VecDeque;
use std::sync::Arc;

use sensepipe::app::events::AppEvent;
use sensepipe::app::ports::{EventSink, HardwarePort};
use sensepipe::sensors::SampleLatch;

// ── Board call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardCall {
    StartConversion,
    Indicator(bool),
    Delay(u32),
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub latch: Arc<SampleLatch>,
    pub samples: VecDeque<u16>,
    pub calls: Vec<BoardCall>,
    /// Requests to swallow without a completion.
    pub lose_next: usize,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new(samples: impl IntoIterator<Item = u16>) -> Self {
        Self {
            latch: Arc::new(SampleLatch::new()),
            samples: samples.into_iter().collect(),
            calls: Vec::new(),
            lose_next: 0,
        }
    }

    pub fn conversions(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == BoardCall::StartConversion)
            .count()
    }

    pub fn pulses(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == BoardCall::Indicator(true))
            .count()
    }

    pub fn indicator_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                BoardCall::Indicator(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl HardwarePort for MockBoard {
    fn start_conversion(&mut self) {
        self.calls.push(BoardCall::StartConversion);
        if self.lose_next > 0 {
            self.lose_next -= 1;
            return;
        }
        if let Some(raw) = self.samples.pop_front() {
            self.latch.on_conversion_complete(raw);
        }
    }

    fn set_indicator(&mut self, on: bool) {
        self.calls.push(BoardCall::Indicator(on));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(BoardCall::Delay(ms));
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_lines(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StatusReported(s) => Some(s.as_str().to_owned()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
