//! Burst accumulation state machine.
//!
//! Pure logic, no I/O and no clock: the engine task feeds it received
//! pulses and settle-window expiries, and collects a finalized credit value
//! once per burst.
//!
//! | State         | `record_pulse`            | `settle_expired`  |
//! |---------------|---------------------------|-------------------|
//! | `Idle`        | -> `Collecting`, tally 1  | no-op             |
//! | `Collecting`  | tally += 1                | -> `FinalizeDue`  |
//! | `FinalizeDue` | -> `Collecting` (reopen)  | no-op             |
//!
//! Normalization policy: `take_finalized` divides the raw edge tally by the
//! scale factor rounding toward zero, then resets to `Idle` with a cleared
//! tally in every case. The input line interrupts on both edges, so the
//! default scale of 2 maps one physical pulse to one credit unit; the
//! sub-scale remainder of a burst is discarded, and the caller decides what
//! to do with a zero result (the engine suppresses the event and logs).
//!
//! There is no bounce filtering beyond the settle window itself: every
//! queued edge counts. A bouncing line inflates the raw tally and the scale
//! division absorbs single-edge glitches only; the settle window is the
//! debounce boundary that matters.

/// Phase of the current accumulation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstState {
    /// No burst in progress.
    Idle,
    /// Pulses are arriving; the settle window restarts on each one.
    Collecting,
    /// The settle window expired; a finalized value is ready to take.
    FinalizeDue,
}

/// Accumulates raw pulse edges into per-burst credit.
///
/// Owned by the engine task alone. Nothing here is shared with the capture
/// ISR; pulse counts arrive only through the handoff queue.
#[derive(Debug)]
pub struct BurstAccumulator {
    state: BurstState,
    raw_tally: u32,
    scale_factor: u32,
}

impl BurstAccumulator {
    /// `scale_factor` is the divisor from raw edges to credit units.
    /// Values below 1 are pinned to 1; config validation rejects 0 upstream.
    pub fn new(scale_factor: u32) -> Self {
        Self {
            state: BurstState::Idle,
            raw_tally: 0,
            scale_factor: scale_factor.max(1),
        }
    }

    pub fn state(&self) -> BurstState {
        self.state
    }

    /// Raw edges recorded in the current burst.
    pub fn raw_tally(&self) -> u32 {
        self.raw_tally
    }

    /// Divisor in effect (after pinning).
    pub fn scale_factor(&self) -> u32 {
        self.scale_factor
    }

    /// A pulse edge arrived from the queue.
    ///
    /// Opens a burst from `Idle`; extends one in `Collecting`. A pulse
    /// landing in `FinalizeDue` (possible in principle between expiry and
    /// finalization, though the single-task engine never interleaves there)
    /// re-opens the burst so no credit is lost.
    pub fn record_pulse(&mut self) {
        match self.state {
            BurstState::Idle => {
                self.state = BurstState::Collecting;
                self.raw_tally = 1;
            }
            BurstState::Collecting => {
                self.raw_tally = self.raw_tally.saturating_add(1);
            }
            BurstState::FinalizeDue => {
                self.state = BurstState::Collecting;
                self.raw_tally = self.raw_tally.saturating_add(1);
            }
        }
    }

    /// The settle window elapsed with no pulse. Marks a collecting burst
    /// ready for finalization; a no-op otherwise.
    pub fn settle_expired(&mut self) {
        if self.state == BurstState::Collecting {
            self.state = BurstState::FinalizeDue;
        }
    }

    /// Take the finalized credit for a completed burst.
    ///
    /// Returns `None` unless the state is `FinalizeDue`. Otherwise yields
    /// `floor(raw_tally / scale_factor)` (which may be zero) and resets the
    /// machine to `Idle` with an empty tally, whether or not the caller
    /// goes on to emit anything.
    pub fn take_finalized(&mut self) -> Option<u32> {
        if self.state != BurstState::FinalizeDue {
            return None;
        }
        let credit = self.raw_tally / self.scale_factor;
        self.raw_tally = 0;
        self.state = BurstState::Idle;
        Some(credit)
    }

    #[cfg(test)]
    fn force_tally(&mut self, tally: u32) {
        self.state = BurstState::Collecting;
        self.raw_tally = tally;
    }
}
