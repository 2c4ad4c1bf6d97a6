//! GPIO pin assignments for the switchbox control board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! Assignments are deployment calibration, not logical contract. They match
//! the harness wired into the deployed cabinet.

// ---------------------------------------------------------------------------
// Bill acceptor (pulse output, open collector)
// ---------------------------------------------------------------------------

/// Digital input from the acceptor's credit pulse line.  Internal pull-up,
/// interrupt on both edges: one accepted bill produces a full low pulse,
/// so two edges reach the capture handler per physical pulse.
#[allow(dead_code)] // consumed only by the device-gated ISR wiring
pub const BILL_ACCEPTOR_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Audio mute relay pair
// ---------------------------------------------------------------------------

/// Speaker relay, positive leg.  Driven together with [`SPEAKER_NEG_GPIO`]:
/// both LOW routes audio for channel 1, both HIGH for channel 2.  Levels are
/// calibration from the installed switcher, never inferred.
pub const SPEAKER_POS_GPIO: i32 = 19;
/// Speaker relay, negative leg.  See [`SPEAKER_POS_GPIO`].
pub const SPEAKER_NEG_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Video source select (momentary press lines)
// ---------------------------------------------------------------------------

/// Emulates the "source 1" button on the downstream video switcher.
/// Pulsed HIGH for the configured press width, LOW when quiescent.
pub const CH1_BUTTON_GPIO: i32 = 17;
/// Emulates the "source 2" button on the downstream video switcher.
pub const CH2_BUTTON_GPIO: i32 = 12;
