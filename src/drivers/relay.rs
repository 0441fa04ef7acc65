//! Door motor relay driver.
//!
//! The motor controller toggles on a short relay pulse: assert, hold,
//! deassert. There is no feedback line — a pulse is fire-and-forget, and
//! GPIO write failures are logged rather than propagated.
//!
//! The hold is a blocking delay on the calling thread; the pulse duration
//! is bounded by config validation (50–5000 ms).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, warn};

use crate::error::ActuatorError;

pub struct RelayDriver<P, D> {
    pin: P,
    delay: D,
    pulse_ms: u32,
}

impl<P, D> RelayDriver<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D, pulse_ms: u32) -> Self {
        Self {
            pin,
            delay,
            pulse_ms,
        }
    }

    /// Assert the relay, hold for the configured pulse, deassert.
    ///
    /// The deassert is attempted even if the assert failed, so a glitchy
    /// GPIO can never leave the relay latched.
    pub fn pulse(&mut self) {
        debug!("relay pulse ({}ms)", self.pulse_ms);
        if let Err(e) = self.pin.set_high() {
            warn!("relay assert: {} ({e:?})", ActuatorError::GpioWriteFailed);
        }
        self.delay.delay_ms(self.pulse_ms);
        if let Err(e) = self.pin.set_low() {
            warn!("relay deassert: {} ({e:?})", ActuatorError::GpioWriteFailed);
        }
    }

    pub fn pulse_ms(&self) -> u32 {
        self.pulse_ms
    }
}
