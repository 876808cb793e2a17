//! End-to-end tests: latch → scheduler → pipeline → status line.
//!
//! A synchronous mock board completes each requested conversion at once,
//! so a queued sample is consumed on the iteration after it was requested.

use super::mock_hw::{BoardCall, MockBoard, RecordingSink};

use sensepipe::app::events::AppEvent;
use sensepipe::config::SystemConfig;
use sensepipe::pipeline::SampleOutcome;
use sensepipe::pipeline::status::ReportOutcome;
use sensepipe::scheduler::{LoopState, Scheduler};

fn startup_config() -> SystemConfig {
    let mut config = SystemConfig::default();
    config.validate().unwrap();
    config.apply_startup_overrides();
    config
}

/// Run until every queued sample has been consumed.  Returns the outcomes
/// in order.
fn drain(s: &mut Scheduler, hw: &mut MockBoard, sink: &mut RecordingSink) -> Vec<SampleOutcome> {
    let latch = hw.latch.clone();
    let mut out = Vec::new();
    let budget = hw.samples.len() + 2;
    for _ in 0..budget {
        if let Some(o) = s.run_once(&latch, hw, sink).sample {
            out.push(o);
        }
    }
    out
}

// ── Worked examples ───────────────────────────────────────────

#[test]
fn above_threshold_sample_flows_to_history_and_log() {
    let mut hw = MockBoard::new([600]);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());
    s.start(&mut sink);

    let out = drain(&mut s, &mut hw, &mut sink);
    assert_eq!(out.len(), 1);

    let p = s.pipeline();
    assert_eq!(out[0].calibrated(), 613);
    assert!(p.is_active());
    assert_eq!(p.history().newest(), Some(175));
    let rec = p.log().get(0).unwrap();
    assert_eq!((rec.value, rec.timestamp, rec.quality), (700, 0, true));
    assert_eq!(p.log().write_index(), 1);
    assert_eq!(p.temperature(), 41);
    assert_eq!(s.uptime(), 1);
}

#[test]
fn below_threshold_sample_only_moves_flags() {
    let mut hw = MockBoard::new([100]);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());

    let out = drain(&mut s, &mut hw, &mut sink);
    assert_eq!(
        out,
        [SampleOutcome::Rejected {
            raw: 100,
            calibrated: 102,
            error_count: 1
        }]
    );

    let p = s.pipeline();
    assert_eq!(p.status_flags(), 0x54);
    assert_eq!(p.error_count(), 1);
    assert_eq!(p.history().newest(), Some(0));
    assert!(p.log().is_empty());
    assert_eq!(p.temperature(), 0);
}

#[test]
fn only_bit_zero_of_flags_is_touched() {
    let mut hw = MockBoard::new([100, 600, 100, 600]);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());

    drain(&mut s, &mut hw, &mut sink);
    assert_eq!(s.pipeline().status_flags(), 0x55);
    assert_eq!(s.pipeline().error_count(), 2);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ActivityChanged { .. })),
        4
    );
}

// ── Buffers ───────────────────────────────────────────────────

#[test]
fn history_keeps_newest_thirty_two_in_order() {
    // 33 active samples spread over several lookup buckets.
    let raws: Vec<u16> = (0..33).map(|i| 500 + i * 15).collect();
    let mut hw = MockBoard::new(raws);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());

    let out = drain(&mut s, &mut hw, &mut sink);
    assert_eq!(out.len(), 33);
    let mapped: Vec<u16> = out
        .iter()
        .map(|o| match *o {
            SampleOutcome::Accepted { mapped, .. } => mapped,
            SampleOutcome::Rejected { .. } => panic!("expected all accepted: {o:?}"),
        })
        .collect();

    let slots = s.pipeline().history().slots();
    for (i, slot) in slots.iter().enumerate() {
        assert_eq!(*slot, (mapped[32 - i] >> 2) as u8, "slot {i}");
    }
}

#[test]
fn seventeenth_log_entry_overwrites_slot_zero() {
    let mut hw = MockBoard::new([600; 17]);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());

    drain(&mut s, &mut hw, &mut sink);
    let log = s.pipeline().log();
    assert_eq!(log.write_index(), 1);
    assert_eq!(log.len(), 16);
    assert_eq!(log.get(0).unwrap().timestamp, 16);
    assert_eq!(log.get(1).unwrap().timestamp, 1);
    let ts: Vec<u8> = log.iter_chronological().map(|r| r.timestamp).collect();
    assert_eq!(ts, (1..=16).collect::<Vec<u8>>());
}

#[test]
fn log_timestamp_wraps_at_256() {
    let mut hw = MockBoard::new([600; 258]);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());

    drain(&mut s, &mut hw, &mut sink);
    assert_eq!(s.uptime(), 258);
    let latest = s.pipeline().log().latest().unwrap();
    assert_eq!(latest.timestamp, 1);
}

// ── Status reporting ──────────────────────────────────────────

#[test]
fn status_line_every_tenth_uptime() {
    let mut hw = MockBoard::new([600; 25]);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());
    s.start(&mut sink);

    drain(&mut s, &mut hw, &mut sink);
    assert_eq!(
        sink.status_lines(),
        [
            "ATmega328P_v1.0: 00C",
            "ATmega328P_v1.0: 41C",
            "ATmega328P_v1.0: 41C"
        ]
    );
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Telemetry(_))), 3);
}

#[test]
fn status_message_layout() {
    let mut hw = MockBoard::new([600; 10]);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());

    drain(&mut s, &mut hw, &mut sink);
    let bytes = s.pipeline().status_message().as_bytes();
    assert_eq!(&bytes[..15], b"ATmega328P_v1.0");
    assert_eq!(bytes[15], b':');
    assert_eq!(bytes[16], b' ');
    assert_eq!(&bytes[17..19], b"41");
    assert_eq!(bytes[19], b'C');
    assert_eq!(bytes[20], 0);
}

#[test]
fn out_of_range_temperature_is_clamped_and_reported() {
    let mut config = startup_config();
    config.calibration_factor = 2.0;
    let mut hw = MockBoard::new([1023; 10]);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&config);

    let out = drain(&mut s, &mut hw, &mut sink);
    assert_eq!(out[0].calibrated(), 2046);
    assert_eq!(s.pipeline().temperature(), 184);
    assert_eq!(s.pipeline().status_message().as_str(), "ATmega328P_v1.0: 99C");
    assert!(sink
        .events
        .contains(&AppEvent::TemperatureClamped { temperature: 184 }));
}

// ── Loop behaviour ────────────────────────────────────────────

#[test]
fn stale_sample_is_never_reprocessed() {
    let mut hw = MockBoard::new([600]);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());

    for _ in 0..10 {
        let latch = hw.latch.clone();
        s.run_once(&latch, &mut hw, &mut sink);
    }
    assert_eq!(s.uptime(), 1);
    assert_eq!(s.pipeline().log().len(), 1);
    assert_eq!(s.state(), LoopState::AwaitingSample);
    // One request per pass; only the first was ever answered.
    assert_eq!(hw.conversions(), 10);
}

#[test]
fn lost_conversion_does_not_stall_acquisition() {
    let mut hw = MockBoard::new([600; 50]);
    hw.lose_next = 1;
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());

    let latch = hw.latch.clone();
    let mut retried = 0;
    for _ in 0..50 {
        if s.run_once(&latch, &mut hw, &mut sink).retried {
            retried += 1;
        }
    }
    assert_eq!(retried, 1);
    assert_eq!(hw.conversions(), 50);
    assert_eq!(s.uptime(), 48);
    assert_eq!(s.pipeline().log().len(), 16);
}

#[test]
fn every_iteration_is_paced_by_the_interval() {
    let mut hw = MockBoard::new([100]);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());

    let latch = hw.latch.clone();
    let first = s.run_once(&latch, &mut hw, &mut sink);
    assert!(first.pulsed);
    let second = s.run_once(&latch, &mut hw, &mut sink);
    assert!(!second.pulsed);
    assert_eq!(second.report, ReportOutcome::Skipped);

    assert_eq!(
        hw.calls,
        [
            BoardCall::StartConversion,
            BoardCall::Indicator(true),
            BoardCall::Delay(100),
            BoardCall::Indicator(false),
            BoardCall::Delay(500),
            BoardCall::StartConversion,
            BoardCall::Delay(500),
        ]
    );
    assert!(!hw.indicator_on());
}

#[test]
fn indicator_follows_activity() {
    let mut hw = MockBoard::new([600, 600, 100, 100, 600]);
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());

    drain(&mut s, &mut hw, &mut sink);
    // Active at power-on, through two accepted samples, then idle for two,
    // then active again for the final sample and the trailing iteration.
    assert_eq!(hw.pulses(), 5);
    assert!(s.pipeline().is_active());
}
