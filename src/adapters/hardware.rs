//! Actuator adapter — bridges the relay and indicator drivers to the
//! domain's [`ActuatorPort`].
//!
//! The sensor side needs no wrapper: [`DoorSensorBank`](crate::sensors::DoorSensorBank)
//! implements [`DoorSensorPort`](crate::app::ports::DoorSensorPort) directly
//! and is owned by the monitor thread. The actuators, by contrast, are
//! driven from the accessory server's threads through the bridge's write
//! handler, so this adapter typically lives behind an `Arc<Mutex<_>>`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::app::ports::ActuatorPort;
use crate::drivers::relay::RelayDriver;
use crate::drivers::status_led::IndicatorLed;

/// Concrete adapter combining the motor relay and the indicator LED.
pub struct ActuatorAdapter<RP, D, LP> {
    relay: RelayDriver<RP, D>,
    indicator: IndicatorLed<LP>,
}

impl<RP, D, LP> ActuatorAdapter<RP, D, LP>
where
    RP: OutputPin,
    D: DelayNs,
    LP: OutputPin,
{
    pub fn new(relay: RelayDriver<RP, D>, indicator: IndicatorLed<LP>) -> Self {
        Self { relay, indicator }
    }
}

impl<RP, D, LP> ActuatorPort for ActuatorAdapter<RP, D, LP>
where
    RP: OutputPin,
    D: DelayNs,
    LP: OutputPin,
{
    fn pulse_relay(&mut self) {
        self.relay.pulse();
    }

    fn set_indicator(&mut self, on: bool) {
        self.indicator.set(on);
    }
}
