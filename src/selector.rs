//! Two-channel A/V selector actuator.
//!
//! Hardware: a speaker relay pair routes audio with channel-dependent
//! levels, and two momentary-press lines emulate the source buttons on the
//! downstream video switcher. Selecting a channel sets the relay pair and
//! "presses" the matching button for a fixed pulse width.
//!
//! | Channel | Mute pair (pos/neg) | Pressed line |
//! |---------|---------------------|--------------|
//! | 1       | LOW / LOW           | CH1 button   |
//! | 2       | HIGH / HIGH         | CH2 button   |
//!
//! Levels reproduce the installed switcher's calibration table exactly;
//! they are not inferred. The driver is generic over the `embedded-hal`
//! output and delay traits, so the full line sequencing runs against
//! recording doubles on the host and raw GPIO lines on the device.
//!
//! `select` blocks for the pulse width (a cooperative delay, hundreds of
//! milliseconds). Do not call it from a latency-sensitive context.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::info;

use crate::config::SystemConfig;
use crate::error::{Error, Result};

/// A validated selector target.
///
/// Construction is the validation boundary: command surfaces go through
/// [`Channel::from_index`], and an identifier outside {1, 2} is rejected
/// before any output line is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    One,
    Two,
}

impl Channel {
    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            n => Err(Error::InvalidChannel(n)),
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Calibrated mute-pair levels, (pos, neg). Both legs currently move
    /// together; kept separate because the harness wires them separately.
    fn mute_levels(self) -> (bool, bool) {
        match self {
            Self::One => (false, false),
            Self::Two => (true, true),
        }
    }
}

/// Selector operations as the command dispatcher sees them.
pub trait ChannelSelector {
    fn select(&mut self, channel: Channel) -> Result<()>;

    /// Walk every channel, returning the one left active.
    fn cycle(&mut self) -> Result<Channel>;
}

/// Drives the selector output lines.
///
/// `&mut self` on every operation is the serialization discipline: a
/// second selection cannot begin while a pulse is in flight.
pub struct SelectorDriver<P: OutputPin, D: DelayNs> {
    mute_pos: P,
    mute_neg: P,
    press_one: P,
    press_two: P,
    delay: D,
    pulse_width_ms: u32,
    cycle_dwell_ms: u32,
    current: Option<Channel>,
}

impl<P: OutputPin, D: DelayNs> SelectorDriver<P, D> {
    pub fn new(
        mute_pos: P,
        mute_neg: P,
        press_one: P,
        press_two: P,
        delay: D,
        config: &SystemConfig,
    ) -> Self {
        Self {
            mute_pos,
            mute_neg,
            press_one,
            press_two,
            delay,
            pulse_width_ms: config.button_pulse_ms,
            cycle_dwell_ms: config.cycle_dwell_ms,
            current: None,
        }
    }

    /// Last successfully selected channel, if any.
    pub fn current(&self) -> Option<Channel> {
        self.current
    }

    /// Switch to `channel`: release both press lines, set the mute pair to
    /// the calibrated levels, press the matching source button for the
    /// configured width, release it.
    ///
    /// Releasing both press lines first defines the quiescent entry state,
    /// which is what keeps the two lines from ever being high together.
    pub fn select(&mut self, channel: Channel) -> Result<()> {
        drive_line(&mut self.press_one, false)?;
        drive_line(&mut self.press_two, false)?;

        let (pos, neg) = channel.mute_levels();
        drive_line(&mut self.mute_pos, pos)?;
        drive_line(&mut self.mute_neg, neg)?;

        let width = self.pulse_width_ms;
        match channel {
            Channel::One => press(&mut self.press_one, &mut self.delay, width)?,
            Channel::Two => press(&mut self.press_two, &mut self.delay, width)?,
        }

        self.current = Some(channel);
        info!("selector: channel {} active", channel.index());
        Ok(())
    }

    /// Walk both channels with the demo dwell between them, ending on
    /// channel 2. Bring-up aid, not a steady-state path: blocks for two
    /// dwells plus two pulses.
    pub fn cycle(&mut self) -> Result<Channel> {
        self.select(Channel::One)?;
        self.delay.delay_ms(self.cycle_dwell_ms);
        self.select(Channel::Two)?;
        self.delay.delay_ms(self.cycle_dwell_ms);
        Ok(Channel::Two)
    }
}

impl<P: OutputPin, D: DelayNs> ChannelSelector for SelectorDriver<P, D> {
    fn select(&mut self, channel: Channel) -> Result<()> {
        SelectorDriver::select(self, channel)
    }

    fn cycle(&mut self) -> Result<Channel> {
        SelectorDriver::cycle(self)
    }
}

fn drive_line<P: OutputPin>(line: &mut P, high: bool) -> Result<()> {
    let res = if high { line.set_high() } else { line.set_low() };
    res.map_err(|_| Error::GpioWrite)
}

/// Momentary press: high, hold, low.
fn press<P: OutputPin, D: DelayNs>(line: &mut P, delay: &mut D, width_ms: u32) -> Result<()> {
    drive_line(line, true)?;
    delay.delay_ms(width_ms);
    drive_line(line, false)
}
