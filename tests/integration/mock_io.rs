//! Mock I/O for integration tests.
//!
//! Records credit events and output-line writes so tests can assert on
//! the full history without touching real GPIO or a real UART.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use switchbox::config::SystemConfig;
use switchbox::credit::{CreditEvent, CreditSink};
use switchbox::selector::SelectorDriver;

// ── Credit sink over an mpsc channel ──────────────────────────

/// Forwards every published credit value to the test thread. The engine
/// task owns the sink; the test holds the receiver.
pub struct ChannelSink {
    tx: mpsc::Sender<u32>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::Receiver<u32>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl CreditSink for ChannelSink {
    fn publish(&mut self, event: &CreditEvent) {
        let _ = self.tx.send(event.payload.value);
    }
}

// ── Recording output lines ────────────────────────────────────

/// Shared write trace: (line name, level), in program order.
pub type Trace = Rc<RefCell<Vec<(&'static str, bool)>>>;

pub fn trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct TracePin {
    name: &'static str,
    trace: Trace,
}

impl TracePin {
    pub fn new(name: &'static str, trace: &Trace) -> Self {
        Self {
            name,
            trace: Rc::clone(trace),
        }
    }
}

impl embedded_hal::digital::ErrorType for TracePin {
    type Error = core::convert::Infallible;
}

impl OutputPin for TracePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push((self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.trace.borrow_mut().push((self.name, true));
        Ok(())
    }
}

/// Delay that returns immediately. Selector flow tests assert on levels
/// and ordering, not wall-clock timing, and the default dwell is 15 s.
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

// ── Helpers ───────────────────────────────────────────────────

/// A full selector wired to recording pins and an instant delay.
pub fn make_selector(config: &SystemConfig) -> (SelectorDriver<TracePin, NoDelay>, Trace) {
    let t = trace();
    let driver = SelectorDriver::new(
        TracePin::new("mute_pos", &t),
        TracePin::new("mute_neg", &t),
        TracePin::new("press_one", &t),
        TracePin::new("press_two", &t),
        NoDelay,
        config,
    );
    (driver, t)
}

/// Last level written to `name`, if it was ever written.
#[allow(dead_code)]
pub fn level_of(trace: &Trace, name: &str) -> Option<bool> {
    trace
        .borrow()
        .iter()
        .rev()
        .find(|(n, _)| *n == name)
        .map(|(_, level)| *level)
}
