//! Outbound credit events and the sink port they leave through.
//!
//! The engine emits one [`CreditEvent`] per finalized burst. Adapters on
//! the other side of [`CreditSink`] decide where it goes: the serial
//! console in production (the web layer tails that stream), an mpsc
//! channel in tests.
//!
//! Delivery is fire-and-forget. The cabinet has no durable outbox, so a
//! failed write is logged and the event is gone; implementations must not
//! retry or buffer.

use serde::Serialize;

/// Discriminator carried by every credit event.
pub const CREDIT_EVENT_TYPE: &str = "bill_acceptor/credit";

/// Wire schema: `{"event_type": "bill_acceptor/credit", "payload": {"value": N}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditEvent {
    pub event_type: &'static str,
    pub payload: CreditPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditPayload {
    /// Credit units for one burst, after scale normalization. Never zero
    /// on the wire; zero-normalized bursts are suppressed at the engine.
    pub value: u32,
}

impl CreditEvent {
    pub fn new(value: u32) -> Self {
        Self {
            event_type: CREDIT_EVENT_TYPE,
            payload: CreditPayload { value },
        }
    }
}

/// Port the engine publishes through.
pub trait CreditSink {
    /// Fire-and-forget. Implementations log and discard on failure.
    fn publish(&mut self, event: &CreditEvent);
}
