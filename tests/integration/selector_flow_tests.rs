//! Integration tests for the command → service → selector chain.
//!
//! The selector is wired to recording pins, so every test asserts on the
//! exact output-line history the hardware would have seen.

use crate::mock_io::{self, level_of};
use switchbox::commands::{self, Command};
use switchbox::config::SystemConfig;
use switchbox::selector::Channel;
use switchbox::service::SwitchService;

// ── Boot behaviour ────────────────────────────────────────────

#[test]
fn boot_selects_the_configured_channel() {
    let config = SystemConfig::default();
    let (mut selector, trace) = mock_io::make_selector(&config);
    let mut service = SwitchService::new();

    let selected = service
        .select_channel(config.initial_channel, &mut selector)
        .unwrap();

    assert_eq!(selected, Channel::Two);
    assert_eq!(level_of(&trace, "mute_pos"), Some(true));
    assert_eq!(level_of(&trace, "mute_neg"), Some(true));
    assert_eq!(level_of(&trace, "press_one"), Some(false));
    assert_eq!(level_of(&trace, "press_two"), Some(false));
}

// ── Command dispatch ──────────────────────────────────────────

// Sole test touching the process-wide command queue; a second one would
// race it under the parallel test harness.
#[test]
fn queued_commands_drive_the_selector_in_order() {
    let config = SystemConfig::default();
    let (mut selector, trace) = mock_io::make_selector(&config);
    let mut service = SwitchService::new();

    assert!(commands::submit(Command::SelectChannel(1)));
    assert!(commands::submit(Command::SelectChannel(9)));
    assert!(commands::submit(Command::CycleChannels));

    while let Some(cmd) = commands::try_next() {
        service.handle_command(cmd, &mut selector);
    }

    // Valid select, a rejected identifier, then a cycle parking on 2.
    assert_eq!(service.current_channel(), Some(Channel::Two));
    assert_eq!(level_of(&trace, "mute_pos"), Some(true));
    assert_eq!(level_of(&trace, "mute_neg"), Some(true));
    assert_eq!(level_of(&trace, "press_one"), Some(false));
    assert_eq!(level_of(&trace, "press_two"), Some(false));
}

#[test]
fn invalid_selection_leaves_the_lines_untouched() {
    let config = SystemConfig::default();
    let (mut selector, trace) = mock_io::make_selector(&config);
    let mut service = SwitchService::new();

    assert!(service.select_channel(0, &mut selector).is_err());

    assert!(trace.borrow().is_empty());
    assert_eq!(service.current_channel(), None);
}

// ── Demo cycle ────────────────────────────────────────────────

#[test]
fn cycle_presses_both_sources_in_order() {
    let config = SystemConfig::default();
    let (mut selector, trace) = mock_io::make_selector(&config);
    let mut service = SwitchService::new();

    service.cycle(&mut selector).unwrap();

    let ops = trace.borrow();
    let one_press = ops
        .iter()
        .position(|&(name, level)| name == "press_one" && level)
        .expect("channel 1 source must be pressed");
    let two_press = ops
        .iter()
        .position(|&(name, level)| name == "press_two" && level)
        .expect("channel 2 source must be pressed");
    assert!(one_press < two_press, "cycle order is 1 then 2: {ops:?}");
    assert_eq!(service.current_channel(), Some(Channel::Two));
}
