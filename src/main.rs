//! Switchbox Firmware — Main Entry Point
//!
//! Two independent data paths share the chip:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  bill acceptor ─ISR─▶ PulseQueue ─▶ AcceptorEngine (task)    │
//! │                                          │                   │
//! │                                          ▼                   │
//! │                                    LogCreditSink             │
//! │                                    (JSON lines on UART)      │
//! │                                                              │
//! │  commands ─▶ CMD_CHANNEL ─▶ SwitchService ─▶ SelectorDriver  │
//! │                 (control loop, main task)    (GPIO + delay)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine task owns the burst state machine; the main task owns the
//! selector output lines. Neither touches the other's hardware.
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod esp_link_shims;
mod pins;

pub mod acceptor;
pub mod commands;
pub mod credit;
pub mod selector;
pub mod service;

mod adapters;
mod drivers;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{error, info, warn};

use adapters::log_sink::LogCreditSink;
use config::SystemConfig;
use drivers::hw_init;
use selector::SelectorDriver;
use service::SwitchService;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Switchbox v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    if let Err(reason) = config.validate() {
        // A config that fails validation cannot drive hardware safely.
        error!("config rejected ({}) — halting", reason);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Peripherals and pulse capture ──────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    acceptor::edge::init();
    if let Err(e) = hw_init::init_isr_service() {
        error!("ISR service init failed: {} — pulse capture disabled", e);
    }

    // ── 4. Selector bring-up ──────────────────────────────────
    let (mute_pos, mute_neg, press_one, press_two) = hw_init::selector_lines();
    let mut selector =
        SelectorDriver::new(mute_pos, mute_neg, press_one, press_two, FreeRtos, &config);
    let mut service = SwitchService::new();
    match service.select_channel(config.initial_channel, &mut selector) {
        Ok(ch) => info!("Boot: channel {} selected", ch.index()),
        Err(e) => warn!("Boot: initial channel select failed: {}", e),
    }

    // ── 5. Acceptor engine task ───────────────────────────────
    let _engine = acceptor::engine::spawn(&config, LogCreditSink::new());

    info!("System ready. Entering command loop.");

    // ── 6. Command loop ───────────────────────────────────────
    loop {
        while let Some(cmd) = commands::try_next() {
            service.handle_command(cmd, &mut selector);
        }
        FreeRtos::delay_ms(config.command_poll_ms);
    }
}
