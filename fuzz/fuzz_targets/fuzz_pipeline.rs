//! Fuzz target: `PipelineState::process` + `report_status`
//!
//! Treats the input as a stream of little-endian raw samples and runs each
//! one through the whole pipeline, rendering the status line whenever the
//! uptime lands on the reporting period.
//!
//! Invariants checked:
//! - No panics under any sample sequence (full-width raw values included)
//! - Bits 1..7 of the status flags never change
//! - The log write index stays below its depth
//! - Every rendered line is exactly 20 visible bytes ending in 'C'
//!
//! cargo fuzz run fuzz_pipeline

#![no_main]

use libfuzzer_sys::fuzz_target;
use sensepipe::config::SystemConfig;
use sensepipe::pipeline::PipelineState;
use sensepipe::pipeline::measurement_log::LOG_DEPTH;
use sensepipe::pipeline::status::{ReportOutcome, STATUS_TEXT_LEN};

fuzz_target!(|data: &[u8]| {
    let config = SystemConfig::default();
    let upper = config.initial_status_flags & !1;
    let mut pipeline = PipelineState::new(&config);

    for (uptime, chunk) in data.chunks_exact(2).enumerate() {
        let raw = u16::from_le_bytes([chunk[0], chunk[1]]);
        let uptime = uptime as u32;

        pipeline.process(raw, uptime);
        assert_eq!(pipeline.status_flags() & !1, upper);
        assert!(pipeline.log().write_index() < LOG_DEPTH);

        if pipeline.report_status(uptime + 1) != ReportOutcome::Skipped {
            let text = pipeline.status_message().as_str();
            assert_eq!(text.len(), STATUS_TEXT_LEN);
            assert!(text.ends_with('C'));
        }
    }
});
