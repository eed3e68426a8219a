//! Rainwatch firmware library.
//!
//! Exposes the sensor pipeline, the station tasks and their port traits
//! for integration testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module, with host
//! simulation fallbacks alongside.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pins;
pub mod pipeline;
pub mod tasks;

pub mod adapters;
pub mod drivers;
