//! Bridge scenarios driven the way the accessory server would drive them:
//! registration, reads, writes and subscriptions through the handlers of
//! a fully built accessory.

use std::sync::{Arc, Mutex};

use garagedoor::adapters::console_server::ConsoleServer;
use garagedoor::app::ports::ActuatorPort;
use garagedoor::door::{DoorShared, DoorState, TargetState};
use garagedoor::error::BridgeError;
use garagedoor::hap::bridge::{build_accessory, Notifier, MANUFACTURER, MODEL};
use garagedoor::hap::registry::{Accessory, AccessoryInfo, NotifyPort};
use garagedoor::hap::{
    AccessoryCategory, AccessoryServer, CharacteristicKind, ServiceKind, SubscriberHandle, Value,
};

use crate::mock_hw::{ActuatorCall, MockActuator, MockNotifyPort};

struct Fixture {
    shared: Arc<DoorShared>,
    port: Arc<MockNotifyPort>,
    actuator: Arc<Mutex<MockActuator>>,
    accessory: Accessory,
}

fn info() -> AccessoryInfo {
    let mut id: heapless::String<17> = heapless::String::new();
    id.push_str("DE:AD:BE:EF:CA:FE").unwrap();
    AccessoryInfo {
        name: "GARAGE DOOR".to_string(),
        id,
        pairing_pin: "111-11-111".to_string(),
        vendor: MANUFACTURER,
        category: AccessoryCategory::GarageDoorOpener,
        port: 811,
        config_version: 1,
    }
}

fn fixture() -> Fixture {
    let shared = Arc::new(DoorShared::new());
    let port = MockNotifyPort::new();
    let notifier = Notifier::new(
        Arc::clone(&shared),
        Arc::clone(&port) as Arc<dyn NotifyPort>,
    );
    let actuator = Arc::new(Mutex::new(MockActuator::new()));
    let accessory = build_accessory(
        info(),
        Arc::clone(&shared),
        notifier,
        Arc::clone(&actuator) as Arc<Mutex<dyn ActuatorPort + Send>>,
    );
    Fixture {
        shared,
        port,
        actuator,
        accessory,
    }
}

impl Fixture {
    /// Borrow the live handler for one door characteristic, as the server
    /// would when dispatching a request.
    fn handler(
        &self,
        kind: CharacteristicKind,
    ) -> &dyn garagedoor::hap::registry::CharacteristicHandler {
        self.accessory
            .services
            .iter()
            .flat_map(|s| &s.characteristics)
            .find(|c| c.kind == kind)
            .and_then(|c| c.handler.as_deref())
            .unwrap_or_else(|| panic!("no handler for {kind:?}"))
    }
}

#[test]
fn registration_succeeds_once_per_id() {
    let mut server = ConsoleServer::new();
    server.register_accessory(fixture().accessory).unwrap();
    assert!(server.register_accessory(fixture().accessory).is_err());
    assert_eq!(server.accessory_count(), 1);
}

#[test]
fn information_service_carries_identity_metadata() {
    let fx = fixture();
    let info_svc = &fx.accessory.services[0];
    assert_eq!(info_svc.kind, ServiceKind::AccessoryInformation);

    let value_of = |kind| {
        info_svc
            .characteristics
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.initial.clone())
    };
    assert_eq!(
        value_of(CharacteristicKind::Manufacturer),
        Some(Value::Str(MANUFACTURER.to_string()))
    );
    assert_eq!(
        value_of(CharacteristicKind::Model),
        Some(Value::Str(MODEL.to_string()))
    );
    assert_eq!(
        value_of(CharacteristicKind::Name),
        Some(Value::Str("GARAGE DOOR".to_string()))
    );
    assert_eq!(
        value_of(CharacteristicKind::SerialNumber),
        Some(Value::Str("DE:AD:BE:EF:CA:FE".to_string()))
    );
}

#[test]
fn target_write_actuates_and_echoes() {
    let fx = fixture();
    let target = fx.handler(CharacteristicKind::TargetDoorState);
    target.set_subscriber(Some(SubscriberHandle::new(3)));

    target.write(Value::UInt(1)).unwrap();

    assert_eq!(fx.shared.target(), TargetState::Closed);
    assert_eq!(target.read(), Value::UInt(1));
    assert_eq!(
        fx.actuator.lock().unwrap().calls,
        vec![ActuatorCall::SetIndicator(false), ActuatorCall::PulseRelay]
    );
    assert_eq!(
        fx.port.sent(),
        vec![(SubscriberHandle::new(3), Value::UInt(1))]
    );
}

#[test]
fn target_write_open_lights_indicator() {
    let fx = fixture();
    let target = fx.handler(CharacteristicKind::TargetDoorState);
    target.write(Value::UInt(0)).unwrap();
    assert_eq!(fx.actuator.lock().unwrap().last_indicator(), Some(true));
}

#[test]
fn out_of_range_write_changes_nothing() {
    let fx = fixture();
    let target = fx.handler(CharacteristicKind::TargetDoorState);
    target.set_subscriber(Some(SubscriberHandle::new(4)));

    assert_eq!(target.write(Value::UInt(7)), Err(BridgeError::InvalidValue));
    assert_eq!(
        target.write(Value::Str("open".to_string())),
        Err(BridgeError::InvalidValue)
    );

    assert_eq!(fx.shared.target(), TargetState::Open);
    assert!(fx.actuator.lock().unwrap().calls.is_empty());
    assert!(fx.port.sent().is_empty());
}

#[test]
fn read_only_characteristics_refuse_writes() {
    let fx = fixture();
    for kind in [
        CharacteristicKind::CurrentDoorState,
        CharacteristicKind::ObstructionDetected,
    ] {
        assert_eq!(
            fx.handler(kind).write(Value::UInt(0)),
            Err(BridgeError::ReadOnly),
            "{kind:?} must be read-only"
        );
    }
}

#[test]
fn reads_reflect_monitor_written_state() {
    let fx = fixture();
    fx.shared.set_current(DoorState::Closing);
    fx.shared.set_obstruction(true);

    assert_eq!(
        fx.handler(CharacteristicKind::CurrentDoorState).read(),
        Value::UInt(DoorState::Closing.code())
    );
    assert_eq!(
        fx.handler(CharacteristicKind::ObstructionDetected).read(),
        Value::Bool(true)
    );
}

#[test]
fn subscriptions_land_in_their_own_slots() {
    let fx = fixture();
    fx.handler(CharacteristicKind::CurrentDoorState)
        .set_subscriber(Some(SubscriberHandle::new(1)));
    fx.handler(CharacteristicKind::TargetDoorState)
        .set_subscriber(Some(SubscriberHandle::new(2)));
    fx.handler(CharacteristicKind::ObstructionDetected)
        .set_subscriber(Some(SubscriberHandle::new(3)));

    assert_eq!(fx.shared.current_subscriber(), Some(SubscriberHandle::new(1)));
    assert_eq!(fx.shared.target_subscriber(), Some(SubscriberHandle::new(2)));
    assert_eq!(
        fx.shared.obstruction_subscriber(),
        Some(SubscriberHandle::new(3))
    );

    fx.handler(CharacteristicKind::TargetDoorState)
        .set_subscriber(None);
    assert_eq!(fx.shared.target_subscriber(), None);
    assert_eq!(fx.shared.current_subscriber(), Some(SubscriberHandle::new(1)));
}

#[test]
fn identify_probe_reads_true() {
    let fx = fixture();
    assert_eq!(
        fx.handler(CharacteristicKind::Identify).read(),
        Value::Bool(true)
    );
}
