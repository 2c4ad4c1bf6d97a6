//! Selector service.
//!
//! [`SwitchService`] owns the selection policy above the actuator: it
//! validates raw channel identifiers, dispatches queued commands, and
//! remembers which channel the hardware was last driven to. The actuator
//! is injected at call sites through the [`ChannelSelector`] port, so the
//! entire dispatch path runs against a mock on the host.

use log::{info, warn};

use crate::commands::Command;
use crate::error::Result;
use crate::selector::{Channel, ChannelSelector};

/// Selection policy and bookkeeping above the actuator.
pub struct SwitchService {
    current: Option<Channel>,
}

impl SwitchService {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Validate `index` and, if valid, drive the selector to it.
    ///
    /// Rejection happens before the selector is touched: an invalid
    /// identifier leaves the output lines exactly as they were.
    pub fn select_channel(
        &mut self,
        index: u8,
        selector: &mut impl ChannelSelector,
    ) -> Result<Channel> {
        let channel = Channel::from_index(index)?;
        selector.select(channel)?;
        self.current = Some(channel);
        Ok(channel)
    }

    /// Run the demo cycle and track where it parked.
    pub fn cycle(&mut self, selector: &mut impl ChannelSelector) -> Result<Channel> {
        let resting = selector.cycle()?;
        self.current = Some(resting);
        Ok(resting)
    }

    /// Process one queued command.
    ///
    /// Failures are logged and absorbed; a malformed or unactionable
    /// command must not take down the control loop.
    pub fn handle_command(&mut self, cmd: Command, selector: &mut impl ChannelSelector) {
        match cmd {
            Command::SelectChannel(index) => match self.select_channel(index, selector) {
                Ok(channel) => info!("service: switched to channel {}", channel.index()),
                Err(err) => warn!("service: select {index} refused: {err}"),
            },
            Command::CycleChannels => match self.cycle(selector) {
                Ok(resting) => info!("service: cycle parked on channel {}", resting.index()),
                Err(err) => warn!("service: cycle aborted: {err}"),
            },
        }
    }

    /// Channel this service last drove successfully, if any.
    pub fn current_channel(&self) -> Option<Channel> {
        self.current
    }
}

impl Default for SwitchService {
    fn default() -> Self {
        Self::new()
    }
}
