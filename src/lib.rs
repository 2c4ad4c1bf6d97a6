//! Switchbox firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod acceptor;
pub mod commands;
pub mod config;
pub mod credit;
pub mod selector;
pub mod service;

mod error;
mod esp_link_shims;
mod pins;

pub use error::{Error, Result};

// The device-only halves of these modules are guarded by cfg attributes
// inside; host builds see their test stand-ins.
pub mod adapters;
pub mod drivers;
