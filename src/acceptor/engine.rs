//! Debounce and accumulation engine.
//!
//! A long-lived task that drains the pulse queue with a bounded receive
//! timeout equal to the settle window. Receiving a pulse restarts the
//! window; a timeout means the line has been quiet long enough to finalize
//! the burst and hand the credit to the sink.
//!
//! Queue timeouts are ordinary control flow here, not failures; the loop
//! never terminates.

use core::time::Duration;

use log::{debug, info, trace};

use super::burst::BurstAccumulator;
use super::queue::PulseQueue;
use crate::config::SystemConfig;
use crate::credit::{CreditEvent, CreditSink};
use crate::drivers::task_pin::{self, Core, TaskSpec};

/// Placement for the engine task: application core, above idle priority,
/// small fixed stack. The loop parks on the queue and touches nothing deep.
pub const ENGINE_TASK: TaskSpec = TaskSpec {
    name: "acceptor\0",
    core: Core::App,
    priority: 10,
    stack_kb: 4,
};

/// Drains captured pulses into per-burst credit events.
pub struct AcceptorEngine<'q, S: CreditSink> {
    queue: &'q PulseQueue,
    acc: BurstAccumulator,
    sink: S,
    settle: Duration,
}

impl<'q, S: CreditSink> AcceptorEngine<'q, S> {
    pub fn new(queue: &'q PulseQueue, config: &SystemConfig, sink: S) -> Self {
        Self {
            queue,
            acc: BurstAccumulator::new(config.scale_factor),
            sink,
            settle: Duration::from_millis(u64::from(config.settle_window_ms)),
        }
    }

    /// One iteration: wait for a pulse or let the settle window expire.
    ///
    /// Public so tests can drive the engine step by step; production code
    /// only calls [`run`](Self::run).
    pub fn poll_once(&mut self) {
        match self.queue.recv_timeout(self.settle) {
            Some(pulse) => {
                trace!(
                    "pulse edge on line {} (level={})",
                    pulse.line,
                    pulse.level as u8
                );
                self.acc.record_pulse();
            }
            None => {
                self.acc.settle_expired();
                if let Some(credit) = self.acc.take_finalized() {
                    if credit > 0 {
                        info!("burst finalized: {credit} credit");
                        self.sink.publish(&CreditEvent::new(credit));
                    } else {
                        debug!("burst normalized to zero, event suppressed");
                    }
                }
                let dropped = self.queue.take_dropped();
                if dropped > 0 {
                    debug!("{dropped} pulse edges dropped at capture (queue full)");
                }
            }
        }
    }

    /// Run forever. Only process shutdown ends this loop.
    pub fn run(&mut self) -> ! {
        info!(
            "acceptor engine up (settle={}ms, scale={})",
            self.settle.as_millis(),
            self.acc.scale_factor()
        );
        loop {
            self.poll_once();
        }
    }
}

/// Spawn the engine on its own core-pinned task, wired to the static
/// capture queue. Call after `edge::init()`.
pub fn spawn<S>(config: &SystemConfig, sink: S) -> std::thread::JoinHandle<()>
where
    S: CreditSink + Send + 'static,
{
    let mut engine = AcceptorEngine::new(super::edge::acceptor_queue(), config, sink);
    task_pin::spawn(ENGINE_TASK, move || engine.run())
}
