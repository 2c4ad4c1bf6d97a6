//! Bill-acceptor credit pipeline.
//!
//! The acceptor reports each accepted bill as a train of pulses on a single
//! open-collector line. This module turns those raw edges into exactly one
//! credit event per burst:
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐     ┌────────────┐
//! │ GPIO ISR    │────▶│  PulseQueue  │────▶│ Engine task  │────▶│ CreditSink │
//! │ (edge)      │     │  (bounded,   │     │ (settle +    │     │ (publish)  │
//! │             │     │   lossy)     │     │  accumulate) │     │            │
//! └─────────────┘     └──────────────┘     └──────────────┘     └────────────┘
//! ```
//!
//! The queue is the only state shared across the interrupt boundary. The
//! burst tally and window state live exclusively inside the engine task.

pub mod burst;
pub mod edge;
pub mod engine;
pub mod queue;

pub use burst::{BurstAccumulator, BurstState};
pub use engine::AcceptorEngine;
pub use queue::{PulseEvent, PulseQueue, PULSE_QUEUE_DEPTH};
