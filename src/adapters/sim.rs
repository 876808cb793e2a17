//! Host simulator — a converter that completes on another thread.
//!
//! [`SimAdc`] stands in for the conversion-complete interrupt: a request
//! is handed over a channel to a worker thread which waits out the
//! conversion latency, pulls a value from the sample source and writes it
//! into the latch.  A request made while a conversion is in flight, or
//! while its result is still unread, is merged into that conversion.
//!
//! Paired with [`SimDelay`] and the host
//! [`GpioOutput`](crate::drivers::indicator::GpioOutput), the whole loop
//! runs unmodified on a development machine.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::app::ports::ConversionPort;
use crate::sensors::SampleLatch;

/// Converter whose completions arrive asynchronously from a worker thread.
pub struct SimAdc {
    requests: Option<Sender<()>>,
    latch: Arc<SampleLatch>,
    in_flight: Arc<AtomicBool>,
    completed: Arc<AtomicU32>,
    worker: Option<JoinHandle<()>>,
}

impl SimAdc {
    /// `source` is called once per conversion on the worker thread.
    pub fn spawn<F>(latch: Arc<SampleLatch>, latency: Duration, mut source: F) -> Self
    where
        F: FnMut() -> u16 + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<()>();
        let completed = Arc::new(AtomicU32::new(0));
        let in_flight = Arc::new(AtomicBool::new(false));
        let done = Arc::clone(&completed);
        let busy = Arc::clone(&in_flight);
        let out = Arc::clone(&latch);

        let worker = thread::spawn(move || {
            // Exits once the sender is dropped.
            for () in rx {
                thread::sleep(latency);
                let raw = source();
                out.on_conversion_complete(raw);
                done.fetch_add(1, Ordering::Release);
                // Cleared after the latch write: a reader that sees `false`
                // also sees the ready flag.
                busy.store(false, Ordering::Release);
                debug!("sim: conversion complete raw={}", raw);
            }
        });

        Self {
            requests: Some(tx),
            latch,
            in_flight,
            completed,
            worker: Some(worker),
        }
    }

    /// Conversions delivered to the latch so far.
    pub fn completed(&self) -> u32 {
        self.completed.load(Ordering::Acquire)
    }
}

impl ConversionPort for SimAdc {
    fn start_conversion(&mut self) {
        if self.worker.as_ref().is_none_or(JoinHandle::is_finished) {
            warn!("sim: conversion worker gone, request dropped");
            return;
        }
        if self.in_flight.load(Ordering::Acquire) || self.latch.is_ready() {
            return;
        }
        let Some(tx) = &self.requests else { return };
        self.in_flight.store(true, Ordering::Release);
        if tx.send(()).is_err() {
            self.in_flight.store(false, Ordering::Release);
            warn!("sim: conversion worker gone, request dropped");
        }
    }
}

impl Drop for SimAdc {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// [`DelayNs`] backed by `thread::sleep`, optionally compressed.
pub struct SimDelay {
    divisor: u32,
}

impl SimDelay {
    /// Real-time delays.
    pub fn new() -> Self {
        Self { divisor: 1 }
    }

    /// Every delay is shortened by `divisor` (at least 1).
    pub fn compressed(divisor: u32) -> Self {
        Self { divisor: divisor.max(1) }
    }
}

impl Default for SimDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns / self.divisor)));
    }
}
