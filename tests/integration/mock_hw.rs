//! Mock hardware and server-side adapters for integration tests.
//!
//! Records every actuator call and delivered notification so tests can
//! assert on the full history without touching real GPIO registers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use garagedoor::app::events::AppEvent;
use garagedoor::app::ports::{ActuatorPort, DoorSensorPort, EventSink};
use garagedoor::door::SensorSnapshot;
use garagedoor::hap::registry::NotifyPort;
use garagedoor::hap::{SubscriberHandle, Value};

// ── Scripted sensors ──────────────────────────────────────────

/// Replays a scripted sequence of snapshots; the last one repeats once
/// the script is exhausted. Optionally raises a cancel flag after a set
/// number of reads, so `run()` loops terminate deterministically.
pub struct MockSensors {
    script: Vec<SensorSnapshot>,
    cursor: usize,
    cancel_after: Option<(usize, Arc<AtomicBool>)>,
}

#[allow(dead_code)]
impl MockSensors {
    pub fn new(script: Vec<SensorSnapshot>) -> Self {
        assert!(!script.is_empty(), "script must have at least one entry");
        Self {
            script,
            cursor: 0,
            cancel_after: None,
        }
    }

    pub fn cancel_after(mut self, reads: usize, flag: Arc<AtomicBool>) -> Self {
        self.cancel_after = Some((reads, flag));
        self
    }

    pub fn reads(&self) -> usize {
        self.cursor
    }
}

impl DoorSensorPort for MockSensors {
    fn read(&mut self) -> SensorSnapshot {
        let snap = self.script[self.cursor.min(self.script.len() - 1)];
        self.cursor += 1;
        if let Some((reads, flag)) = &self.cancel_after {
            if self.cursor >= *reads {
                flag.store(true, Ordering::Release);
            }
        }
        snap
    }
}

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    PulseRelay,
    SetIndicator(bool),
}

#[derive(Default)]
pub struct MockActuator {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pulse_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| **c == ActuatorCall::PulseRelay)
            .count()
    }

    pub fn last_indicator(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::SetIndicator(on) => Some(*on),
            ActuatorCall::PulseRelay => None,
        })
    }
}

impl ActuatorPort for MockActuator {
    fn pulse_relay(&mut self) {
        self.calls.push(ActuatorCall::PulseRelay);
    }

    fn set_indicator(&mut self, on: bool) {
        self.calls.push(ActuatorCall::SetIndicator(on));
    }
}

// ── Notify capture ────────────────────────────────────────────

/// [`NotifyPort`] that records every delivered (subscriber, value) pair.
pub struct MockNotifyPort {
    sent: Mutex<Vec<(SubscriberHandle, Value)>>,
}

#[allow(dead_code)]
impl MockNotifyPort {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<(SubscriberHandle, Value)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn values(&self) -> Vec<Value> {
        self.sent.lock().unwrap().iter().map(|(_, v)| v.clone()).collect()
    }
}

impl NotifyPort for MockNotifyPort {
    fn notify(&self, subscriber: SubscriberHandle, value: Value) {
        self.sent.lock().unwrap().push((subscriber, value));
    }
}

// ── Event capture ─────────────────────────────────────────────

#[derive(Default)]
pub struct VecSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for VecSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
