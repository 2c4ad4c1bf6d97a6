//! Command intake for the channel selector.
//!
//! A bounded MPMC channel decouples whoever produces selection requests
//! (serial console, a network bridge, a front panel) from the control
//! loop that owns the output lines. Producers never block: a full queue
//! refuses the command with a warning, and the control loop drains the
//! backlog between polls.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

/// A selector request. The channel identifier is raw here; validation
/// happens at the service boundary, not at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Switch to the given channel identifier.
    SelectChannel(u8),
    /// Walk both channels with the demo dwell.
    CycleChannels,
}

/// Command queue depth. Selection is a human-scale event; four pending
/// commands is already a pathological backlog.
const CMD_DEPTH: usize = 4;

static CMD_CHANNEL: Channel<CriticalSectionRawMutex, Command, CMD_DEPTH> = Channel::new();

/// Queue a command for the control loop.
///
/// Returns `false` when the queue is full and the command was refused.
pub fn submit(cmd: Command) -> bool {
    if CMD_CHANNEL.try_send(cmd).is_err() {
        warn!("commands: queue full, dropping {cmd:?}");
        return false;
    }
    true
}

/// Drain one pending command, if any.
pub fn try_next() -> Option<Command> {
    CMD_CHANNEL.try_receive().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test exercises the static queue end to end; splitting it up
    // would let parallel tests race on the shared channel.
    #[test]
    fn submit_and_drain_honor_fifo_and_capacity() {
        assert_eq!(try_next(), None);

        assert!(submit(Command::SelectChannel(1)));
        assert!(submit(Command::CycleChannels));
        assert!(submit(Command::SelectChannel(2)));
        assert!(submit(Command::SelectChannel(1)));
        // Depth is 4: the fifth submission is refused and the queued
        // four are untouched.
        assert!(!submit(Command::CycleChannels));

        assert_eq!(try_next(), Some(Command::SelectChannel(1)));
        assert_eq!(try_next(), Some(Command::CycleChannels));
        assert_eq!(try_next(), Some(Command::SelectChannel(2)));
        assert_eq!(try_next(), Some(Command::SelectChannel(1)));
        assert_eq!(try_next(), None);
    }
}
