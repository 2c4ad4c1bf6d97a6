//! Log-based credit sink adapter.
//!
//! Implements [`CreditSink`] by serializing each credit event to its JSON
//! wire form and writing the line to the ESP-IDF logger (UART / USB-CDC
//! in production). The downstream vending controller tails this stream;
//! a future MQTT or framed-serial adapter would implement the same trait.

use log::{info, warn};

use crate::credit::{CreditEvent, CreditSink};

/// Adapter that emits every [`CreditEvent`] as one JSON line.
pub struct LogCreditSink;

impl LogCreditSink {
    pub fn new() -> Self {
        Self
    }
}

impl CreditSink for LogCreditSink {
    fn publish(&mut self, event: &CreditEvent) {
        match serde_json::to_string(event) {
            Ok(line) => info!("{line}"),
            Err(err) => warn!("credit event dropped, serialize failed: {err}"),
        }
    }
}
