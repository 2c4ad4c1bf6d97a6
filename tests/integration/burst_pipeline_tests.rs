//! End-to-end tests for the pulse capture → burst → credit pipeline.
//!
//! Each test owns a private pulse queue with a live engine task over it,
//! and stands in for the GPIO ISR by pushing edges directly. Timing uses
//! a short settle window with wide margins so the tests stay stable on
//! loaded CI hosts.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::mock_io::ChannelSink;
use switchbox::acceptor::{AcceptorEngine, PulseEvent, PulseQueue};
use switchbox::config::SystemConfig;

const SETTLE_MS: u32 = 120;
/// Comfortably longer than the settle window, so a finalize always lands
/// between phases even under scheduler jitter.
const GAP: Duration = Duration::from_millis(500);
const EVENT_WAIT: Duration = Duration::from_secs(3);
const QUIET_WAIT: Duration = Duration::from_millis(700);

fn config(scale: u32) -> SystemConfig {
    SystemConfig {
        settle_window_ms: SETTLE_MS,
        scale_factor: scale,
        ..SystemConfig::default()
    }
}

fn fresh_queue() -> &'static PulseQueue {
    let queue: &'static PulseQueue = Box::leak(Box::new(PulseQueue::new()));
    queue.init();
    queue
}

/// Starts a live engine draining `queue`; returns the credit stream.
fn start_engine(queue: &'static PulseQueue, scale: u32) -> Receiver<u32> {
    let (sink, rx) = ChannelSink::new();
    let mut engine = AcceptorEngine::new(queue, &config(scale), sink);
    // Detached on purpose: `run` never returns, the thread dies with the
    // test process.
    thread::spawn(move || engine.run());
    rx
}

/// Spawns a live engine over a fresh queue; returns the ISR side and the
/// credit stream.
fn spawn_pipeline(scale: u32) -> (&'static PulseQueue, Receiver<u32>) {
    let queue = fresh_queue();
    let rx = start_engine(queue, scale);
    (queue, rx)
}

/// Stand-in for the capture ISR. Bursts in these tests never exceed the
/// queue depth, so every edge must be accepted.
fn push_edges(queue: &PulseQueue, n: u32) {
    for _ in 0..n {
        assert!(queue.send_from_isr(PulseEvent {
            line: 4,
            level: true,
        }));
    }
}

fn expect_credit(rx: &Receiver<u32>) -> u32 {
    rx.recv_timeout(EVENT_WAIT).expect("credit event expected")
}

fn expect_quiet(rx: &Receiver<u32>) {
    assert!(matches!(
        rx.recv_timeout(QUIET_WAIT),
        Err(RecvTimeoutError::Timeout)
    ));
}

#[test]
fn burst_of_edges_yields_one_scaled_credit() {
    let (queue, rx) = spawn_pipeline(2);
    push_edges(queue, 10);
    assert_eq!(expect_credit(&rx), 5);
    expect_quiet(&rx);
}

#[test]
fn silence_between_groups_splits_credits() {
    let (queue, rx) = spawn_pipeline(2);
    push_edges(queue, 4);
    thread::sleep(GAP);
    push_edges(queue, 6);
    assert_eq!(expect_credit(&rx), 2);
    assert_eq!(expect_credit(&rx), 3);
}

#[test]
fn edges_spread_across_one_window_accumulate() {
    let (queue, rx) = spawn_pipeline(2);
    push_edges(queue, 3);
    // Shorter than the settle window: still the same burst.
    thread::sleep(Duration::from_millis(30));
    push_edges(queue, 3);
    assert_eq!(expect_credit(&rx), 3);
    expect_quiet(&rx);
}

#[test]
fn sub_scale_burst_is_suppressed_entirely() {
    let (queue, rx) = spawn_pipeline(2);

    // A normal burst first: 3 edges scale to 1 credit, remainder discarded.
    push_edges(queue, 3);
    assert_eq!(expect_credit(&rx), 1);

    push_edges(queue, 1);
    expect_quiet(&rx);

    // The engine is still live and neither the stray edge nor the earlier
    // remainder leaked into the next burst: five edges make exactly 2
    // credits, not 3.
    push_edges(queue, 5);
    assert_eq!(expect_credit(&rx), 2);
}

#[test]
fn saturated_queue_yields_clean_bursts_on_recovery() {
    let queue = fresh_queue();

    // Flood a stalled pipeline: with no consumer yet, only the oldest ten
    // edges fit and every later edge is refused at capture.
    let mut refused = 0u32;
    for _ in 0..40 {
        if !queue.send_from_isr(PulseEvent {
            line: 4,
            level: true,
        }) {
            refused += 1;
        }
    }
    assert_eq!(refused, 30);
    assert_eq!(queue.take_dropped(), 30);

    // Once the engine comes up, the ten retained edges settle into one
    // ordinary burst.
    let rx = start_engine(queue, 2);
    assert_eq!(expect_credit(&rx), 5);

    // The overflow left no residue behind: the next burst scales exactly.
    push_edges(queue, 6);
    assert_eq!(expect_credit(&rx), 3);
    expect_quiet(&rx);
}

#[test]
fn scale_one_reports_raw_edge_counts() {
    let (queue, rx) = spawn_pipeline(1);
    push_edges(queue, 7);
    assert_eq!(expect_credit(&rx), 7);
}
