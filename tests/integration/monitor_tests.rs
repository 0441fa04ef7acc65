//! End-to-end monitor scenarios: scripted sensor inputs in, notification
//! and event history out, through the real shared context and notifier.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use garagedoor::app::events::AppEvent;
use garagedoor::app::service::DoorMonitor;
use garagedoor::config::DoorConfig;
use garagedoor::door::{DoorShared, DoorState, SensorSnapshot};
use garagedoor::hap::bridge::Notifier;
use garagedoor::hap::registry::NotifyPort;
use garagedoor::hap::{SubscriberHandle, Value};

use crate::mock_hw::{MockNotifyPort, MockSensors, VecSink};

fn snap(switch1: bool, switch2: bool, obstruction: bool) -> SensorSnapshot {
    SensorSnapshot {
        switch1,
        switch2,
        obstruction,
    }
}

fn monitor_fixture() -> (DoorMonitor, Arc<DoorShared>, Arc<MockNotifyPort>) {
    let shared = Arc::new(DoorShared::new());
    let port = MockNotifyPort::new();
    let notifier = Notifier::new(
        Arc::clone(&shared),
        Arc::clone(&port) as Arc<dyn NotifyPort>,
    );
    let monitor = DoorMonitor::new(Arc::clone(&shared), notifier, &DoorConfig::default());
    shared.set_current_subscriber(Some(SubscriberHandle::new(10)));
    shared.set_obstruction_subscriber(Some(SubscriberHandle::new(11)));
    (monitor, shared, port)
}

#[test]
fn door_cycle_with_obstruction_scenario() {
    let (mut monitor, shared, port) = monitor_fixture();
    let mut sink = VecSink::new();

    // Open at boot, then the door starts opening, then the wall button is
    // pressed mid-travel, held for two polls, and released.
    let mut sensors = MockSensors::new(vec![
        snap(false, false, false), // baseline: Open — no notify
        snap(true, false, false),  // Opening — one notify
        snap(true, false, true),   // obstruction: Stopped + flag, two notifies
        snap(true, false, true),   // held: no change, no notify
        snap(true, false, false),  // released: back to Opening + flag clear
    ]);

    for _ in 0..5 {
        monitor.tick(&mut sensors, &mut sink);
    }

    assert_eq!(shared.current(), DoorState::Opening);
    assert!(!shared.obstruction());
    assert_eq!(
        port.sent(),
        vec![
            (SubscriberHandle::new(10), Value::UInt(DoorState::Opening.code())),
            (SubscriberHandle::new(10), Value::UInt(DoorState::Stopped.code())),
            (SubscriberHandle::new(11), Value::Bool(true)),
            (SubscriberHandle::new(10), Value::UInt(DoorState::Opening.code())),
            (SubscriberHandle::new(11), Value::Bool(false)),
        ]
    );
    assert_eq!(
        sink.events,
        vec![
            AppEvent::Started(DoorState::Open),
            AppEvent::StateChanged {
                from: DoorState::Open,
                to: DoorState::Opening,
            },
            AppEvent::StateChanged {
                from: DoorState::Opening,
                to: DoorState::Stopped,
            },
            AppEvent::ObstructionChanged(true),
            AppEvent::StateChanged {
                from: DoorState::Stopped,
                to: DoorState::Opening,
            },
            AppEvent::ObstructionChanged(false),
        ]
    );
}

#[test]
fn full_travel_emits_each_transition_once() {
    let (mut monitor, shared, port) = monitor_fixture();
    let mut sink = VecSink::new();

    // Closed → opening → open, each phase held for several polls.
    let mut sensors = MockSensors::new(vec![
        snap(false, true, false),
        snap(false, true, false),
        snap(true, false, false),
        snap(true, false, false),
        snap(true, false, false),
        snap(false, false, false),
        snap(false, false, false),
    ]);

    for _ in 0..7 {
        monitor.tick(&mut sensors, &mut sink);
    }

    assert_eq!(shared.current(), DoorState::Open);
    assert_eq!(
        port.values(),
        vec![
            Value::UInt(DoorState::Opening.code()),
            Value::UInt(DoorState::Open.code()),
        ]
    );
}

#[test]
fn obstruction_at_boot_is_baseline_not_edge() {
    let (mut monitor, shared, port) = monitor_fixture();
    let mut sink = VecSink::new();

    // Button already held when the firmware comes up.
    let mut sensors = MockSensors::new(vec![snap(false, true, true), snap(false, true, true)]);

    monitor.tick(&mut sensors, &mut sink);
    monitor.tick(&mut sensors, &mut sink);

    // Both values are tracked, but neither poll saw an edge.
    assert_eq!(shared.current(), DoorState::Stopped);
    assert!(shared.obstruction());
    assert!(port.sent().is_empty());
    assert_eq!(sink.events, vec![AppEvent::Started(DoorState::Stopped)]);
}

#[test]
fn run_loop_stops_when_cancel_raised() {
    let shared = Arc::new(DoorShared::new());
    let port = MockNotifyPort::new();
    let notifier = Notifier::new(
        Arc::clone(&shared),
        Arc::clone(&port) as Arc<dyn NotifyPort>,
    );
    let config = DoorConfig {
        poll_interval_ms: 100,
        ..DoorConfig::default()
    };
    let mut monitor = DoorMonitor::new(Arc::clone(&shared), notifier, &config);

    let cancel = Arc::new(AtomicBool::new(false));
    let mut sensors =
        MockSensors::new(vec![snap(false, false, false)]).cancel_after(3, Arc::clone(&cancel));
    let mut sink = VecSink::new();

    monitor.run(&mut sensors, &mut sink, &cancel);

    assert_eq!(monitor.tick_count(), 3);
    assert_eq!(sensors.reads(), 3);
}
