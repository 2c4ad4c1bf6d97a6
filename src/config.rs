//! System configuration parameters
//!
//! All tunable calibration for the switchbox. Values ship as compiled
//! defaults; a provisioning layer may deserialize overrides at boot.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Acceptor ---
    /// Quiet interval (milliseconds) after the last pulse before a burst is
    /// finalized. Some installs run 2000 ms for slower acceptors.
    pub settle_window_ms: u32,
    /// Divisor applied to the raw edge tally to produce credit units.
    /// The acceptor input interrupts on both edges, so one physical pulse
    /// contributes two edges: a scale of 2 yields one credit per pulse.
    pub scale_factor: u32,

    // --- Selector ---
    /// Width (milliseconds) of the momentary press on a video button line.
    pub button_pulse_ms: u32,
    /// Dwell (milliseconds) on each channel during a demo cycle.
    pub cycle_dwell_ms: u32,
    /// Channel selected at boot, before any command arrives. The installed
    /// cabinet comes up on channel 2.
    pub initial_channel: u8,

    // --- Timing ---
    /// Main-loop poll interval (milliseconds) for pending commands.
    pub command_poll_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Acceptor
            settle_window_ms: 1000,
            scale_factor: 2, // both-edge sensing, 2 edges per pulse

            // Selector
            button_pulse_ms: 500,
            cycle_dwell_ms: 15_000,
            initial_channel: 2,

            // Timing
            command_poll_ms: 50, // 20 Hz
        }
    }
}

impl SystemConfig {
    /// Rejects calibration values that would wedge the pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.settle_window_ms == 0 {
            return Err(Error::Config("settle_window_ms must be nonzero"));
        }
        if self.scale_factor == 0 {
            return Err(Error::Config("scale_factor must be nonzero"));
        }
        if self.button_pulse_ms == 0 {
            return Err(Error::Config("button_pulse_ms must be nonzero"));
        }
        if self.initial_channel != 1 && self.initial_channel != 2 {
            return Err(Error::Config("initial_channel must be 1 or 2"));
        }
        if self.command_poll_ms == 0 {
            return Err(Error::Config("command_poll_ms must be nonzero"));
        }
        Ok(())
    }
}
