#![allow(dead_code)] // Init reserved for provisioning-layer typed returns

//! Unified error types for the switchbox firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! top-level loop's error handling uniform. All variants are `Copy` so they
//! pass through the command dispatcher without allocation.
//!
//! Expected control-flow conditions are deliberately absent: a queue receive
//! timeout and a queue-full drop are normal operation, not errors.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A channel identifier outside {1, 2} was requested. Rejected before
    /// any output line is touched.
    InvalidChannel(u8),
    /// An output line could not be driven.
    GpioWrite,
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChannel(n) => write!(f, "invalid channel identifier: {n}"),
            Self::GpioWrite => write!(f, "GPIO write failed"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
