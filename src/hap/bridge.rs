//! Characteristic bridge — hardware signals in, protocol callbacks out.
//!
//! One [`CharacteristicHandler`] implementation per characteristic kind:
//!
//! | Characteristic      | Read | Write              | Subscribe |
//! |---------------------|------|--------------------|-----------|
//! | TargetDoorState     | yes  | yes (actuates)     | yes       |
//! | CurrentDoorState    | yes  | —                  | yes       |
//! | ObstructionDetected | yes  | —                  | yes       |
//! | Identify            | yes  | —                  | —         |
//!
//! All handlers share the [`DoorShared`] context; the [`Notifier`] owns
//! the edge of the notify path (slot lookup + fire-and-forget delivery).

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};

use crate::app::ports::ActuatorPort;
use crate::door::{DoorShared, DoorState, TargetState};
use crate::error::BridgeError;

use super::registry::{
    Accessory, AccessoryBuilder, AccessoryInfo, CharacteristicHandler, NotifyPort,
};
use super::{CharacteristicKind, ServiceKind, SubscriberHandle, Value};

// ---------------------------------------------------------------------------
// Notifier
// ---------------------------------------------------------------------------

/// Fire-and-forget change notification for the three observable
/// characteristics.
///
/// A publish with no active subscriber is a logged no-op, not an error —
/// the controller simply has not enabled events yet.
#[derive(Clone)]
pub struct Notifier {
    shared: Arc<DoorShared>,
    port: Arc<dyn NotifyPort>,
}

impl Notifier {
    pub fn new(shared: Arc<DoorShared>, port: Arc<dyn NotifyPort>) -> Self {
        Self { shared, port }
    }

    pub fn publish_current(&self, state: DoorState) {
        match self.shared.current_subscriber() {
            Some(sub) => self.port.notify(sub, Value::UInt(state.code())),
            None => debug!("notify skipped: no CurrentDoorState subscriber"),
        }
    }

    pub fn publish_target(&self, target: TargetState) {
        match self.shared.target_subscriber() {
            Some(sub) => self.port.notify(sub, Value::UInt(target.code())),
            None => debug!("notify skipped: no TargetDoorState subscriber"),
        }
    }

    pub fn publish_obstruction(&self, detected: bool) {
        match self.shared.obstruction_subscriber() {
            Some(sub) => self.port.notify(sub, Value::Bool(detected)),
            None => debug!("notify skipped: no ObstructionDetected subscriber"),
        }
    }
}

// ---------------------------------------------------------------------------
// CurrentDoorState — read + subscribe
// ---------------------------------------------------------------------------

pub struct CurrentStateHandler {
    shared: Arc<DoorShared>,
}

impl CurrentStateHandler {
    pub fn new(shared: Arc<DoorShared>) -> Self {
        Self { shared }
    }
}

impl CharacteristicHandler for CurrentStateHandler {
    fn read(&self) -> Value {
        let state = self.shared.current();
        debug!("read CurrentDoorState -> {:?}", state);
        Value::UInt(state.code())
    }

    fn set_subscriber(&self, subscriber: Option<SubscriberHandle>) {
        debug!("CurrentDoorState subscriber -> {:?}", subscriber);
        self.shared.set_current_subscriber(subscriber);
    }
}

// ---------------------------------------------------------------------------
// TargetDoorState — read + write (actuation) + subscribe
// ---------------------------------------------------------------------------

pub struct TargetStateHandler {
    shared: Arc<DoorShared>,
    notifier: Notifier,
    actuator: Arc<Mutex<dyn ActuatorPort + Send>>,
}

impl TargetStateHandler {
    pub fn new(
        shared: Arc<DoorShared>,
        notifier: Notifier,
        actuator: Arc<Mutex<dyn ActuatorPort + Send>>,
    ) -> Self {
        Self {
            shared,
            notifier,
            actuator,
        }
    }
}

impl CharacteristicHandler for TargetStateHandler {
    fn read(&self) -> Value {
        let target = self.shared.target();
        debug!("read TargetDoorState -> {:?}", target);
        Value::UInt(target.code())
    }

    /// Store the new target, mirror it on the indicator LED, pulse the
    /// relay to toggle the motor, and echo the value to the subscriber.
    ///
    /// The relay hold blocks the server's calling thread for the
    /// configured pulse duration (bounded latency, not asynchronous).
    fn write(&self, value: Value) -> Result<(), BridgeError> {
        let code = value.as_u8().ok_or(BridgeError::InvalidValue)?;
        let target = TargetState::try_from_code(code).ok_or_else(|| {
            warn!("rejecting TargetDoorState write: code {code} outside {{0,1}}");
            BridgeError::InvalidValue
        })?;

        info!("TargetDoorState written: {:?}", target);
        self.shared.set_target(target);

        {
            let mut actuator = self
                .actuator
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            actuator.set_indicator(target == TargetState::Open);
            actuator.pulse_relay();
        }

        self.notifier.publish_target(target);
        Ok(())
    }

    fn set_subscriber(&self, subscriber: Option<SubscriberHandle>) {
        debug!("TargetDoorState subscriber -> {:?}", subscriber);
        self.shared.set_target_subscriber(subscriber);
    }
}

// ---------------------------------------------------------------------------
// ObstructionDetected — read + subscribe
// ---------------------------------------------------------------------------

pub struct ObstructionHandler {
    shared: Arc<DoorShared>,
}

impl ObstructionHandler {
    pub fn new(shared: Arc<DoorShared>) -> Self {
        Self { shared }
    }
}

impl CharacteristicHandler for ObstructionHandler {
    fn read(&self) -> Value {
        Value::Bool(self.shared.obstruction())
    }

    fn set_subscriber(&self, subscriber: Option<SubscriberHandle>) {
        debug!("ObstructionDetected subscriber -> {:?}", subscriber);
        self.shared.set_obstruction_subscriber(subscriber);
    }
}

// ---------------------------------------------------------------------------
// Identify — discovery probe, read-only, stateless
// ---------------------------------------------------------------------------

pub struct IdentifyHandler;

impl CharacteristicHandler for IdentifyHandler {
    fn read(&self) -> Value {
        Value::Bool(true)
    }
}

// ---------------------------------------------------------------------------
// Accessory assembly
// ---------------------------------------------------------------------------

/// Vendor string baked into the accessory information service.
pub const MANUFACTURER: &str = "OLAV";
/// Hardware model tag.
pub const MODEL: &str = "ESP32_GARAGE_OPENER";

/// Build the complete garage-door accessory: the accessory-information
/// service (static metadata + identify probe) and the garage-door-opener
/// service (the three live characteristics).
pub fn build_accessory(
    info: AccessoryInfo,
    shared: Arc<DoorShared>,
    notifier: Notifier,
    actuator: Arc<Mutex<dyn ActuatorPort + Send>>,
) -> Accessory {
    let name = info.name.clone();
    let serial = info.id.as_str().to_string();

    AccessoryBuilder::new(info)
        .service(ServiceKind::AccessoryInformation)
        .characteristic(
            CharacteristicKind::Identify,
            Value::Bool(true),
            Box::new(IdentifyHandler),
        )
        .static_characteristic(
            CharacteristicKind::Manufacturer,
            Value::Str(MANUFACTURER.to_string()),
        )
        .static_characteristic(CharacteristicKind::Model, Value::Str(MODEL.to_string()))
        .static_characteristic(CharacteristicKind::Name, Value::Str(name))
        .static_characteristic(CharacteristicKind::SerialNumber, Value::Str(serial))
        .static_characteristic(
            CharacteristicKind::FirmwareRevision,
            Value::Str(env!("CARGO_PKG_VERSION").to_string()),
        )
        .finish()
        .service(ServiceKind::GarageDoorOpener)
        .characteristic(
            CharacteristicKind::CurrentDoorState,
            Value::UInt(shared.current().code()),
            Box::new(CurrentStateHandler::new(Arc::clone(&shared))),
        )
        .characteristic(
            CharacteristicKind::TargetDoorState,
            Value::UInt(shared.target().code()),
            Box::new(TargetStateHandler::new(
                Arc::clone(&shared),
                notifier,
                actuator,
            )),
        )
        .characteristic(
            CharacteristicKind::ObstructionDetected,
            Value::Bool(shared.obstruction()),
            Box::new(ObstructionHandler::new(shared)),
        )
        .finish()
        .build()
}
