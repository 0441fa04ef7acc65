//! Door input bank — position switches and obstruction button.
//!
//! Generic over [`embedded_hal::digital::InputPin`] so the same code runs
//! against esp-idf-hal pin drivers on target and plain mock pins in host
//! tests. Implements the domain's [`DoorSensorPort`].
//!
//! Individual pin read failures are logged and the previous good level is
//! retained — a flaky input must not crash the poll loop, and the stale
//! level is overwritten on the next successful cycle.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::DoorSensorPort;
use crate::door::SensorSnapshot;
use crate::error::SensorError;

/// Owns the three door inputs and produces a [`SensorSnapshot`] per poll.
pub struct DoorSensorBank<S1, S2, OB> {
    switch1: S1,
    switch2: S2,
    /// Active-low momentary button with external pull-up.
    obstruction: OB,
    last: SensorSnapshot,
}

impl<S1, S2, OB> DoorSensorBank<S1, S2, OB>
where
    S1: InputPin,
    S2: InputPin,
    OB: InputPin,
{
    pub fn new(switch1: S1, switch2: S2, obstruction: OB) -> Self {
        Self {
            switch1,
            switch2,
            obstruction,
            last: SensorSnapshot::default(),
        }
    }

    /// Read all three inputs, normalising the button to "pressed".
    pub fn sample(&mut self) -> SensorSnapshot {
        let switch1 = match self.switch1.is_high() {
            Ok(level) => level,
            Err(e) => {
                warn!("switch1: {} ({e:?})", SensorError::GpioReadFailed);
                self.last.switch1
            }
        };
        let switch2 = match self.switch2.is_high() {
            Ok(level) => level,
            Err(e) => {
                warn!("switch2: {} ({e:?})", SensorError::GpioReadFailed);
                self.last.switch2
            }
        };
        // Low level = pressed.
        let obstruction = match self.obstruction.is_low() {
            Ok(pressed) => pressed,
            Err(e) => {
                warn!("obstruction: {} ({e:?})", SensorError::GpioReadFailed);
                self.last.obstruction
            }
        };

        self.last = SensorSnapshot {
            switch1,
            switch2,
            obstruction,
        };
        self.last
    }
}

impl<S1, S2, OB> DoorSensorPort for DoorSensorBank<S1, S2, OB>
where
    S1: InputPin,
    S2: InputPin,
    OB: InputPin,
{
    fn read(&mut self) -> SensorSnapshot {
        self.sample()
    }
}
