//! Door monitor — the periodic sensor-fusion task.
//!
//! ```text
//!  DoorSensorPort ──▶ ┌─────────────────────┐ ──▶ EventSink (log)
//!                     │     DoorMonitor      │
//!                     │ derive · edge-detect │ ──▶ Notifier (protocol)
//!                     └─────────────────────┘
//! ```
//!
//! Each poll cycle reads the switches, derives the door state from the
//! truth table (obstruction overrides to Stopped), stores the result in
//! the shared context, and raises a notification for every characteristic
//! whose value changed since the previous poll. The first poll only
//! establishes the baseline — nothing is notified until a real edge.

use core::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info};

use crate::config::DoorConfig;
use crate::door::{DoorShared, DoorState};
use crate::hap::bridge::Notifier;
use std::sync::Arc;

use super::events::AppEvent;
use super::ports::{DoorSensorPort, EventSink};

/// The periodic monitor task. Owns the edge-detection baselines; all
/// current values live in the shared context.
pub struct DoorMonitor {
    shared: Arc<DoorShared>,
    notifier: Notifier,
    poll_interval: Duration,

    /// Door state published at the previous poll (`None` before the first).
    last_state: Option<DoorState>,
    /// Obstruction flag published at the previous poll.
    last_obstruction: Option<bool>,

    tick_count: u64,
}

impl DoorMonitor {
    pub fn new(shared: Arc<DoorShared>, notifier: Notifier, config: &DoorConfig) -> Self {
        Self {
            shared,
            notifier,
            poll_interval: Duration::from_millis(u64::from(config.poll_interval_ms)),
            last_state: None,
            last_obstruction: None,
            tick_count: 0,
        }
    }

    /// Run one poll cycle: read → derive → store → notify edges.
    ///
    /// Pure with respect to time — tests drive this directly without the
    /// sleep in [`run`](Self::run).
    pub fn tick(&mut self, sensors: &mut impl DoorSensorPort, sink: &mut impl EventSink) {
        self.tick_count += 1;

        let snapshot = sensors.read();
        let state = DoorState::derive(snapshot);
        let obstruction = snapshot.obstruction;

        // Recomputed fully each cycle; a misread in the snapshot simply
        // gets overwritten next poll.
        self.shared.set_current(state);
        self.shared.set_obstruction(obstruction);

        match self.last_state {
            None => {
                info!("door monitor baseline: {:?}", state);
                sink.emit(&AppEvent::Started(state));
            }
            Some(prev) if prev != state => {
                info!("door state: {:?} -> {:?}", prev, state);
                sink.emit(&AppEvent::StateChanged {
                    from: prev,
                    to: state,
                });
                self.notifier.publish_current(state);
            }
            Some(_) => {}
        }
        self.last_state = Some(state);

        // The obstruction flag is edge-detected independently — its
        // notification is not gated by a door-state change.
        match self.last_obstruction {
            Some(prev) if prev != obstruction => {
                info!("obstruction: {} -> {}", prev, obstruction);
                sink.emit(&AppEvent::ObstructionChanged(obstruction));
                self.notifier.publish_obstruction(obstruction);
            }
            Some(_) => {}
            None => debug!("obstruction baseline: {obstruction}"),
        }
        self.last_obstruction = Some(obstruction);
    }

    /// Poll forever at the configured interval until `cancel` is raised.
    ///
    /// In production the flag is never set and the loop lives as long as
    /// the process; tests and shutdown paths flip it to stop the task
    /// without killing the thread.
    pub fn run(
        &mut self,
        sensors: &mut impl DoorSensorPort,
        sink: &mut impl EventSink,
        cancel: &AtomicBool,
    ) {
        info!(
            "door monitor polling every {}ms",
            self.poll_interval.as_millis()
        );
        while !cancel.load(Ordering::Acquire) {
            self.tick(sensors, sink);
            std::thread::sleep(self.poll_interval);
        }
        info!("door monitor cancelled after {} polls", self.tick_count);
    }

    /// Most recently derived door state, if a poll has happened.
    pub fn state(&self) -> Option<DoorState> {
        self.last_state
    }

    /// Total poll cycles executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
