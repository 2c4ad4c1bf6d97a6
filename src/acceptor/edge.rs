//! Edge capture: the ISR-side boundary of the credit pipeline.
//!
//! The GPIO ISR trampoline in `drivers::hw_init` lands here. Bounded work
//! only: build a [`PulseEvent`], attempt one non-blocking push. No locks,
//! no allocation, no logging; a full queue drops the edge and the loss is
//! counted inside the queue for the engine to report later.

use super::queue::{PulseEvent, PulseQueue};

/// The queue between the capture ISR and the engine task. Static so the
/// ISR can reach it; the engine borrows it at spawn.
static ACCEPTOR_QUEUE: PulseQueue = PulseQueue::new();

/// Capture queue handle for the engine task and boot-time init.
pub fn acceptor_queue() -> &'static PulseQueue {
    &ACCEPTOR_QUEUE
}

/// Allocate queue storage. Call once at boot, before the capture ISR is
/// registered, so the first edge has somewhere to land.
pub fn init() {
    ACCEPTOR_QUEUE.init();
}

/// Called on every edge of the acceptor input line.
/// Safe in interrupt context: one non-blocking push, drop on full.
pub fn acceptor_isr_handler(line: i32, level: bool) {
    let _ = ACCEPTOR_QUEUE.send_from_isr(PulseEvent { line, level });
}
