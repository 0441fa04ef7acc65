//! Door state model and the shared control context.
//!
//! The door has no position encoder — its state is derived every poll from
//! two reed switch levels plus the obstruction button, with no memory of
//! the previous cycle:
//!
//! ```text
//!  switch1 | switch2 | state
//!  --------+---------+--------
//!   low    |  low    | Open
//!   low    |  high   | Closed
//!   high   |  low    | Opening
//!   high   |  high   | Closing
//!
//!  obstruction pressed → Stopped (overrides the table)
//! ```
//!
//! [`DoorShared`] is the single context object shared between the door
//! monitor task and the characteristic bridge handlers. Every field has
//! its own synchronization primitive, so the monitor (writer of state)
//! and the server-driven handlers (writer of target and slots) never
//! race on unguarded memory.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::hap::SubscriberHandle;

// ---------------------------------------------------------------------------
// State enumerations (wire codes match the accessory protocol)
// ---------------------------------------------------------------------------

/// Current door state as exposed through the CurrentDoorState characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DoorState {
    Open = 0,
    Closed = 1,
    Opening = 2,
    Closing = 3,
    Stopped = 4,
}

impl DoorState {
    /// Protocol wire code for this state.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Convert a wire code back to `DoorState`. Panics on out-of-range in
    /// debug builds; returns `Stopped` in release (safe fallback).
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::Open,
            1 => Self::Closed,
            2 => Self::Opening,
            3 => Self::Closing,
            4 => Self::Stopped,
            _ => {
                debug_assert!(false, "invalid door state code: {code}");
                Self::Stopped
            }
        }
    }

    /// Map the two position switch levels to a door state.
    ///
    /// Recomputed fully each poll cycle — no hysteresis, no memory of the
    /// prior levels. A misread simply gets overwritten on the next poll.
    pub const fn from_switches(switch1: bool, switch2: bool) -> Self {
        match (switch1, switch2) {
            (false, false) => Self::Open,
            (false, true) => Self::Closed,
            (true, false) => Self::Opening,
            (true, true) => Self::Closing,
        }
    }

    /// Derive the state from a full sensor snapshot, applying the
    /// obstruction override.
    pub const fn derive(snapshot: SensorSnapshot) -> Self {
        if snapshot.obstruction {
            Self::Stopped
        } else {
            Self::from_switches(snapshot.switch1, snapshot.switch2)
        }
    }
}

/// Commanded door target as exposed through the TargetDoorState characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TargetState {
    Open = 0,
    Closed = 1,
}

impl TargetState {
    /// Protocol wire code for this target.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Strict decode — anything outside {0, 1} is a protocol violation
    /// and must be rejected by the write handler.
    pub const fn try_from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Open),
            1 => Some(Self::Closed),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor snapshot
// ---------------------------------------------------------------------------

/// A point-in-time read of every door input.
///
/// `switch1`/`switch2` carry the raw logic levels of the position reed
/// switches; `obstruction` is already polarity-normalised (`true` =
/// button pressed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    pub switch1: bool,
    pub switch2: bool,
    pub obstruction: bool,
}

// ---------------------------------------------------------------------------
// Shared control context
// ---------------------------------------------------------------------------

/// Shared mutable state between the door monitor and the bridge handlers.
///
/// Writer discipline (enforced by the module APIs, backed by per-field
/// synchronization rather than convention):
/// - `current` / `obstruction` — written only by the monitor.
/// - `target` — written only by the TargetDoorState write handler.
/// - each subscriber slot — written only by its own characteristic's
///   subscribe/unsubscribe call.
pub struct DoorShared {
    current: AtomicU8,
    target: AtomicU8,
    obstruction: AtomicBool,

    current_sub: Mutex<Option<SubscriberHandle>>,
    target_sub: Mutex<Option<SubscriberHandle>>,
    obstruction_sub: Mutex<Option<SubscriberHandle>>,
}

impl DoorShared {
    /// Fresh context: door assumed open, target open, no obstruction,
    /// no subscribers.
    pub fn new() -> Self {
        Self {
            current: AtomicU8::new(DoorState::Open.code()),
            target: AtomicU8::new(TargetState::Open.code()),
            obstruction: AtomicBool::new(false),
            current_sub: Mutex::new(None),
            target_sub: Mutex::new(None),
            obstruction_sub: Mutex::new(None),
        }
    }

    // ── Door state (monitor-written) ──────────────────────────

    pub fn current(&self) -> DoorState {
        DoorState::from_code(self.current.load(Ordering::Acquire))
    }

    pub fn set_current(&self, state: DoorState) {
        self.current.store(state.code(), Ordering::Release);
    }

    pub fn obstruction(&self) -> bool {
        self.obstruction.load(Ordering::Acquire)
    }

    pub fn set_obstruction(&self, detected: bool) {
        self.obstruction.store(detected, Ordering::Release);
    }

    // ── Target state (write-handler-written) ──────────────────

    pub fn target(&self) -> TargetState {
        match TargetState::try_from_code(self.target.load(Ordering::Acquire)) {
            Some(t) => t,
            // Unreachable through set_target; fall back rather than panic.
            None => TargetState::Open,
        }
    }

    pub fn set_target(&self, target: TargetState) {
        self.target.store(target.code(), Ordering::Release);
    }

    // ── Subscription slots (one per observable characteristic) ─
    //
    // A slot holds at most one handle; a new subscribe replaces the old
    // handle and an unsubscribe clears it. Poisoned locks are recovered
    // by taking the inner value — a panicked subscriber thread must not
    // wedge the monitor's notify path.

    pub fn current_subscriber(&self) -> Option<SubscriberHandle> {
        *Self::slot(&self.current_sub)
    }

    pub fn set_current_subscriber(&self, sub: Option<SubscriberHandle>) {
        *Self::slot(&self.current_sub) = sub;
    }

    pub fn target_subscriber(&self) -> Option<SubscriberHandle> {
        *Self::slot(&self.target_sub)
    }

    pub fn set_target_subscriber(&self, sub: Option<SubscriberHandle>) {
        *Self::slot(&self.target_sub) = sub;
    }

    pub fn obstruction_subscriber(&self) -> Option<SubscriberHandle> {
        *Self::slot(&self.obstruction_sub)
    }

    pub fn set_obstruction_subscriber(&self, sub: Option<SubscriberHandle>) {
        *Self::slot(&self.obstruction_sub) = sub;
    }

    fn slot(
        sub: &Mutex<Option<SubscriberHandle>>,
    ) -> std::sync::MutexGuard<'_, Option<SubscriberHandle>> {
        sub.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DoorShared {
    fn default() -> Self {
        Self::new()
    }
}
