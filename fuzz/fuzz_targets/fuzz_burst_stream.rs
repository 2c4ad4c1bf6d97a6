//! Fuzz target: `BurstAccumulator` operation streams
//!
//! Drives arbitrary interleavings of pulse, settle, and take operations
//! into the burst accumulator and asserts that it never panics, never
//! reports a credit other than tally / scale, and always resets after a
//! finalized burst is taken.
//!
//! cargo fuzz run fuzz_burst_stream

#![no_main]

use libfuzzer_sys::fuzz_target;
use switchbox::acceptor::{BurstAccumulator, BurstState};

fuzz_target!(|data: &[u8]| {
    let Some((&scale_byte, ops)) = data.split_first() else {
        return;
    };

    // First byte picks the scale factor (0 exercises the pin-to-one
    // path), the rest drive the machine.
    let mut acc = BurstAccumulator::new(u32::from(scale_byte % 16));

    for &b in ops {
        match b % 3 {
            0 => acc.record_pulse(),
            1 => acc.settle_expired(),
            _ => {
                let tally = acc.raw_tally();
                let scale = acc.scale_factor();
                if let Some(credit) = acc.take_finalized() {
                    assert_eq!(credit, tally / scale);
                    assert_eq!(acc.state(), BurstState::Idle);
                    assert_eq!(acc.raw_tally(), 0);
                }
            }
        }
    }
});
