//! One-shot hardware peripheral initialization.
//!
//! Configures the acceptor input, the selector output lines, and the GPIO
//! interrupt service using raw ESP-IDF sys calls. Called once from `main()`
//! before the command loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before any task is spawned;
    // single-threaded at this point.
    unsafe {
        init_acceptor_input()?;
        init_selector_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── Acceptor input ────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_acceptor_input() -> Result<(), HwInitError> {
    // Open-collector pulse line: internal pull-up, sense both edges so a
    // full low pulse delivers two captures.
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pins::BILL_ACCEPTOR_GPIO,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }

    info!("hw_init: acceptor input configured (pull-up, both edges)");
    Ok(())
}

// ── Selector outputs ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_selector_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::SPEAKER_POS_GPIO,
        pins::SPEAKER_NEG_GPIO,
        pins::CH1_BUTTON_GPIO,
        pins::CH2_BUTTON_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        // Quiescent: press lines released, mute pair on the channel-1 level
        // until the boot-time select runs.
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: selector outputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_selector_outputs().
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── Output line adapter ───────────────────────────────────────

/// A raw GPIO output exposed through the `embedded-hal` digital traits, so
/// the selector driver stays generic over real lines and test doubles.
#[derive(Debug, Clone, Copy)]
pub struct OutputLine {
    pin: i32,
}

impl OutputLine {
    pub const fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl embedded_hal::digital::ErrorType for OutputLine {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for OutputLine {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        gpio_write(self.pin, false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        gpio_write(self.pin, true);
        Ok(())
    }
}

/// Production wiring for the selector's four output lines, in driver
/// constructor order: mute pair first, then the two press lines.
pub fn selector_lines() -> (OutputLine, OutputLine, OutputLine, OutputLine) {
    (
        OutputLine::new(pins::SPEAKER_POS_GPIO),
        OutputLine::new(pins::SPEAKER_NEG_GPIO),
        OutputLine::new(pins::CH1_BUTTON_GPIO),
        OutputLine::new(pins::CH2_BUTTON_GPIO),
    )
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn acceptor_gpio_isr(_arg: *mut core::ffi::c_void) {
    // SAFETY: gpio_get_level is a register read; safe in ISR context.
    let level = unsafe { gpio_get_level(pins::BILL_ACCEPTOR_GPIO) } != 0;
    crate::acceptor::edge::acceptor_isr_handler(pins::BILL_ACCEPTOR_GPIO, level);
}

/// Install the per-pin GPIO ISR service and register the acceptor handler.
/// Call after [`init_peripherals`] and after the pulse queue is initialized,
/// so the first edge has somewhere to land.
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), HwInitError> {
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable). The registered handler is
    // a static function that only pushes to the bounded pulse queue.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        gpio_set_intr_type(pins::BILL_ACCEPTOR_GPIO, gpio_int_type_t_GPIO_INTR_ANYEDGE);
        gpio_isr_handler_add(
            pins::BILL_ACCEPTOR_GPIO,
            Some(acceptor_gpio_isr),
            core::ptr::null_mut(),
        );
        gpio_intr_enable(pins::BILL_ACCEPTOR_GPIO);

        info!("hw_init: ISR service installed (acceptor pulse line)");
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
