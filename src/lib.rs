//! sensepipe firmware library.
//!
//! Exposes the acquisition pipeline, scheduler and adapters for
//! integration testing and host simulation.  All ESP-IDF-specific code is
//! guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod pipeline;
pub mod scheduler;

pub mod adapters;
pub mod drivers;
pub mod sensors;
