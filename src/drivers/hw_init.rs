//! One-shot hardware peripheral initialization.
//!
//! Configures the sensor ADC channel, every mapped output pin and the
//! conversion timer using raw ESP-IDF sys calls.  Called once from
//! `main()` before the acquisition loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    TimerInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc)    => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::TimerInitFailed(rc)  => write!(f, "conversion timer init failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the loop; single-threaded.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
        init_conversion_timer()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: `ADC1_HANDLE` is written once by `init_adc()` before the
/// conversion timer exists; afterwards it is only read.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), pins::SENSOR_ADC_CHANNEL, &chan_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::AdcInitFailed(ret)); }

    info!("hw_init: ADC1 configured (CH{}=sensor)", pins::SENSOR_ADC_CHANNEL);
    Ok(())
}

/// Single blocking conversion.  Returns the driver status code on failure.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Result<u16, i32> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — handle is initialised and only read.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(ret);
    }
    Ok(raw.max(0) as u16)
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    for &pin in &pins::OUTPUT_PINS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured ({:?})", pins::OUTPUT_PINS);
    Ok(())
}

/// Drive an output pin.  Returns the driver status code on failure.
#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), i32> {
    // SAFETY: gpio_set_level writes to an output pin configured in
    // init_gpio_outputs(). Main-loop only.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret == ESP_OK as i32 { Ok(()) } else { Err(ret) }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) -> Result<(), i32> {
    Ok(())
}

// ── Conversion timer ──────────────────────────────────────────
//
// The oneshot ADC driver has no completion interrupt, so a one-shot
// esp_timer plays that role: `start_conversion()` arms it and its callback
// performs the read and publishes the result to the sample latch.

/// Settling time between a conversion request and the read.
#[cfg(target_os = "espidf")]
const CONVERSION_DELAY_US: u64 = 100;

#[cfg(target_os = "espidf")]
static mut CONVERSION_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: CONVERSION_TIMER is written once in `init_conversion_timer()`
/// before the loop runs.  Only read afterwards.
#[cfg(target_os = "espidf")]
unsafe fn conversion_timer() -> esp_timer_handle_t { unsafe { CONVERSION_TIMER } }

#[cfg(target_os = "espidf")]
unsafe extern "C" fn conversion_done_cb(_arg: *mut core::ffi::c_void) {
    crate::drivers::adc::complete_conversion(adc1_read(pins::SENSOR_ADC_CHANNEL));
}

#[cfg(target_os = "espidf")]
unsafe fn init_conversion_timer() -> Result<(), HwInitError> {
    let args = esp_timer_create_args_t {
        callback: Some(conversion_done_cb),
        arg: core::ptr::null_mut(),
        dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
        name: b"adc\0".as_ptr() as *const _,
        skip_unhandled_events: true,
    };
    // SAFETY: CONVERSION_TIMER is written here once at boot.
    let ret = unsafe { esp_timer_create(&args, &raw mut CONVERSION_TIMER) };
    if ret != ESP_OK as i32 { return Err(HwInitError::TimerInitFailed(ret)); }
    info!("hw_init: conversion timer created");
    Ok(())
}

/// Arm the conversion timer.  A request while one is pending is ignored.
#[cfg(target_os = "espidf")]
pub fn trigger_conversion() {
    // SAFETY: conversion_timer() contract — handle created at boot.
    unsafe {
        let t = conversion_timer();
        if t.is_null() || esp_timer_is_active(t) {
            return;
        }
        let ret = esp_timer_start_once(t, CONVERSION_DELAY_US);
        if ret != ESP_OK as i32 {
            log::warn!("hw_init: conversion timer start failed (rc={})", ret);
        }
    }
}
