//! sensepipe firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │                                                          │
//! │  HardwareAdapter(OneShotAdc, GpioOutput, FreeRtos)       │
//! │  LogEventSink                                            │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ────────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │ Scheduler · PipelineState (pure logic)             │  │
//! │  │ calibrate · threshold · history · log · status     │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │  conversion timer callback ──▶ SAMPLE_LATCH              │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info, warn};

use sensepipe::adapters::hardware::HardwareAdapter;
use sensepipe::adapters::log_sink::LogEventSink;
use sensepipe::config::SystemConfig;
use sensepipe::error::Error;
use sensepipe::drivers::adc::OneShotAdc;
use sensepipe::drivers::hw_init;
use sensepipe::drivers::indicator::GpioOutput;
use sensepipe::pins;
use sensepipe::scheduler::Scheduler;
use sensepipe::sensors::SAMPLE_LATCH;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  sensepipe v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let mut config = SystemConfig::default();
    config.validate()?;
    if config.apply_startup_overrides() {
        info!("Loop interval overridden to {}ms", config.device.interval_ms);
    }
    match serde_json::to_string(&config) {
        Ok(json) => info!("Config: {}", json),
        Err(e) => warn!("Config encode failed: {}", e),
    }

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {}", e);
        return Err(Error::from(e).into());
    }

    let mut hw = HardwareAdapter::new(
        OneShotAdc::new(config.adc_bits),
        GpioOutput::new(pins::INDICATOR_GPIO),
        FreeRtos,
    );
    let mut sink = LogEventSink::new();

    // ── 4. Main loop ──────────────────────────────────────────
    let mut scheduler = Scheduler::new(&config);
    scheduler.start(&mut sink);
    scheduler.run(&SAMPLE_LATCH, &mut hw, &mut sink)
}
