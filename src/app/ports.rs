//! Port traits — the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DoorMonitor / bridge handlers (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks, config storage)
//! implement these traits. The domain core consumes them via generics or
//! trait objects, so it never touches hardware directly.

use crate::config::DoorConfig;
use crate::door::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the monitor calls this once per poll cycle.
pub trait DoorSensorPort {
    /// Read the two position switches and the obstruction button.
    ///
    /// Never fails: an adapter that cannot read a pin reports the last
    /// good level instead (a misread is overwritten on the next cycle).
    fn read(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the bridge's target write handler drives the door
/// through this.
///
/// All calls are fire-and-forget — the relay has no feedback line, so
/// failures are logged by the adapter and never surfaced to the caller.
pub trait ActuatorPort {
    /// Assert the motor relay, hold for the configured pulse duration,
    /// then deassert. Blocks the calling thread for the hold — a bounded
    /// latency cost paid by whoever invokes the write handler.
    fn pulse_relay(&mut self);

    /// Drive the target-state indicator LED.
    fn set_indicator(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, MQTT,
/// etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting
/// ([`DoorConfig::validate`]); invalid ranges are rejected with
/// [`ConfigError::ValidationFailed`], not silently clamped. Door *state*
/// is never stored — only tunables and accessory identity.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    fn load(&self) -> Result<DoorConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &DoorConfig) -> Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
