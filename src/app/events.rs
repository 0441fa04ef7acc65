//! Outbound application events.
//!
//! The [`DoorMonitor`](super::service::DoorMonitor) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them — log to serial, mirror to telemetry, etc.
//! Protocol notifications travel separately through the bridge's notify
//! path; these events exist for observability.

use crate::door::{DoorState, TargetState};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The monitor has started and established its first baseline.
    Started(DoorState),

    /// The derived door state changed between polls.
    StateChanged { from: DoorState, to: DoorState },

    /// The obstruction flag flipped.
    ObstructionChanged(bool),

    /// An external controller wrote a new target state.
    TargetWritten(TargetState),
}
