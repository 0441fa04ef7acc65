//! Target-state indicator LED (onboard blue LED).
//!
//! Lit while the last commanded target is "open". Purely cosmetic — no
//! control logic reads it back, so write failures are logged and dropped.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::ActuatorError;

pub struct IndicatorLed<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> IndicatorLed<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    pub fn set(&mut self, on: bool) {
        let result = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match result {
            Ok(()) => self.lit = on,
            Err(e) => warn!("indicator: {} ({e:?})", ActuatorError::GpioWriteFailed),
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
