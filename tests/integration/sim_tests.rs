//! Host simulation: the real adapter stack with an asynchronous converter.
//!
//! Conversions complete on a worker thread, so the scheduler sees the
//! ready flag appear between iterations exactly as it would from the
//! interrupt on hardware.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::mock_hw::RecordingSink;

use embedded_hal::digital::StatefulOutputPin;
use sensepipe::adapters::hardware::HardwareAdapter;
use sensepipe::adapters::log_sink::LogEventSink;
use sensepipe::adapters::sim::{SimAdc, SimDelay};
use sensepipe::app::events::AppEvent;
use sensepipe::config::SystemConfig;
use sensepipe::drivers::indicator::GpioOutput;
use sensepipe::pins::INDICATOR_GPIO;
use sensepipe::scheduler::Scheduler;
use sensepipe::sensors::SampleLatch;

fn startup_config() -> SystemConfig {
    let mut config = SystemConfig::default();
    config.apply_startup_overrides();
    config
}

#[test]
fn threaded_converter_drives_full_pipeline() {
    let latch = Arc::new(SampleLatch::new());
    let mut values = [600u16, 600, 100, 600, 600, 600, 600, 600, 600, 600, 600]
        .into_iter()
        .cycle();
    let adc = SimAdc::spawn(Arc::clone(&latch), Duration::from_micros(200), move || {
        values.next().unwrap_or(0)
    });
    let mut hw = HardwareAdapter::new(adc, GpioOutput::new(INDICATOR_GPIO), SimDelay::compressed(1000));
    let mut sink = RecordingSink::new();
    let mut s = Scheduler::new(&startup_config());
    s.start(&mut sink);

    let deadline = Instant::now() + Duration::from_secs(10);
    while s.uptime() < 10 && Instant::now() < deadline {
        s.run_once(&latch, &mut hw, &mut sink);
    }

    assert_eq!(s.uptime(), 10, "simulation stalled");
    assert_eq!(s.pipeline().error_count(), 1);
    assert_eq!(s.pipeline().log().len(), 9);
    assert_eq!(
        sink.status_lines(),
        ["ATmega328P_v1.0: 00C", "ATmega328P_v1.0: 41C"]
    );
    assert!(sink.events.contains(&AppEvent::ActivityChanged { active: false }));

    // Every request was answered exactly once; at most one is in flight.
    let (adc, mut pin, _) = hw.into_parts();
    let consumed = 10;
    assert!(adc.completed() >= consumed);
    assert!(pin.pulses() >= 9);
    assert!(pin.is_set_low().unwrap());
}

#[test]
fn log_sink_handles_a_live_run() {
    let latch = Arc::new(SampleLatch::new());
    let adc = SimAdc::spawn(Arc::clone(&latch), Duration::ZERO, || 700);
    let mut hw = HardwareAdapter::new(adc, GpioOutput::new(INDICATOR_GPIO), SimDelay::compressed(1000));
    let mut sink = LogEventSink::new();
    let mut s = Scheduler::new(&startup_config());
    s.start(&mut sink);

    let deadline = Instant::now() + Duration::from_secs(10);
    while s.uptime() < 3 && Instant::now() < deadline {
        s.run_once(&latch, &mut hw, &mut sink);
    }

    assert_eq!(s.uptime(), 3);
    // Started + status + telemetry, then one sample event per consumed sample.
    assert!(sink.emitted() >= 6);
}
