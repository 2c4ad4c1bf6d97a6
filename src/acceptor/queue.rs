//! Bounded handoff queue between the capture ISR and the engine task.
//!
//! Producer side never blocks: when the queue is full the edge is dropped
//! and counted. Losing pulses under overload is the designed degradation
//! path; unbounded buffering under a stuck consumer is not.
//!
//! Discipline is single-producer / single-consumer: the capture ISR pushes,
//! the engine task receives. Nothing else may touch the queue (tests stand
//! in for the ISR on the host).
//!
//! On the device the backing store is a FreeRTOS queue, whose send path is
//! ISR-aware. On the host it is a fixed-capacity deque behind a mutex with
//! a condvar for the consumer's bounded wait, so the full pipeline runs in
//! ordinary test processes with identical semantics.

/// Capacity of the handoff queue. Deliberately small: a burst is drained
/// within one settle window, and anything beyond this under a stuck
/// consumer is dropped by policy.
pub const PULSE_QUEUE_DEPTH: usize = 10;

/// One captured edge of the acceptor input.
///
/// Carries the line identity and the level sampled inside the ISR. The
/// engine counts events; the level is kept for trace diagnostics.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseEvent {
    pub line: i32,
    pub level: bool,
}

// ── Device backend (FreeRTOS queue) ───────────────────────────

#[cfg(target_os = "espidf")]
mod backend {
    use super::{PulseEvent, PULSE_QUEUE_DEPTH};
    use core::sync::atomic::{AtomicU32, Ordering};
    use core::time::Duration;
    use esp_idf_hal::delay::{TickType, NON_BLOCK};
    use esp_idf_hal::task::queue::Queue;
    use std::sync::OnceLock;

    /// Bounded SPSC pulse queue backed by a FreeRTOS queue.
    pub struct PulseQueue {
        inner: OnceLock<Queue<PulseEvent>>,
        dropped: AtomicU32,
    }

    impl PulseQueue {
        pub const fn new() -> Self {
            Self {
                inner: OnceLock::new(),
                dropped: AtomicU32::new(0),
            }
        }

        /// Allocate the FreeRTOS queue storage. Idempotent; call once at
        /// boot before the capture ISR is registered.
        pub fn init(&self) {
            let _ = self.inner.set(Queue::new(PULSE_QUEUE_DEPTH));
        }

        /// Non-blocking push from the capture ISR. Returns `false` (and
        /// counts a drop) when the queue is full or not yet initialized.
        pub fn send_from_isr(&self, ev: PulseEvent) -> bool {
            let Some(q) = self.inner.get() else {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            };
            match q.send_back(ev, NON_BLOCK) {
                Ok(_) => true,
                Err(_) => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    false
                }
            }
        }

        /// Bounded blocking receive for the engine task. `None` on timeout.
        pub fn recv_timeout(&self, timeout: Duration) -> Option<PulseEvent> {
            let q = self.inner.get()?;
            q.recv_front(TickType::from(timeout).ticks()).map(|(ev, _)| ev)
        }

        /// Drain the overflow counter (drops since the last call).
        pub fn take_dropped(&self) -> u32 {
            self.dropped.swap(0, Ordering::Relaxed)
        }
    }
}

// ── Host backend (mutex + condvar) ────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod backend {
    use super::{PulseEvent, PULSE_QUEUE_DEPTH};
    use core::sync::atomic::{AtomicU32, Ordering};
    use core::time::Duration;
    use std::sync::{Condvar, Mutex, PoisonError};
    use std::time::Instant;

    /// Bounded SPSC pulse queue, host stand-in with the same contract as
    /// the FreeRTOS-backed build.
    pub struct PulseQueue {
        inner: Mutex<heapless::Deque<PulseEvent, PULSE_QUEUE_DEPTH>>,
        ready: Condvar,
        dropped: AtomicU32,
    }

    impl PulseQueue {
        pub const fn new() -> Self {
            Self {
                inner: Mutex::new(heapless::Deque::new()),
                ready: Condvar::new(),
                dropped: AtomicU32::new(0),
            }
        }

        /// No storage to allocate on the host.
        pub fn init(&self) {}

        /// Non-blocking push. Returns `false` (and counts a drop) when full.
        pub fn send_from_isr(&self, ev: PulseEvent) -> bool {
            let mut buf = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            if buf.push_back(ev).is_err() {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            self.ready.notify_one();
            true
        }

        /// Bounded blocking receive. `None` on timeout.
        pub fn recv_timeout(&self, timeout: Duration) -> Option<PulseEvent> {
            let deadline = Instant::now() + timeout;
            let mut buf = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            loop {
                if let Some(ev) = buf.pop_front() {
                    return Some(ev);
                }
                let now = Instant::now();
                if now >= deadline {
                    return None;
                }
                let (guard, _) = self
                    .ready
                    .wait_timeout(buf, deadline - now)
                    .unwrap_or_else(PoisonError::into_inner);
                buf = guard;
            }
        }

        /// Drain the overflow counter (drops since the last call).
        pub fn take_dropped(&self) -> u32 {
            self.dropped.swap(0, Ordering::Relaxed)
        }
    }
}

pub use backend::PulseQueue;
