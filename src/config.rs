//! System configuration parameters
//!
//! All tunable parameters for the garage opener. Values can be overridden
//! via NVS (non-volatile storage); door state itself is never persisted.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorConfig {
    // --- Timing ---
    /// Sensor poll interval for the door monitor (milliseconds)
    pub poll_interval_ms: u32,
    /// Relay assert-hold duration when toggling the motor (milliseconds)
    pub relay_pulse_ms: u32,

    // --- Accessory identity ---
    /// Name advertised to the accessory server
    pub accessory_name: String,
    /// Pairing setup code (XXX-XX-XXX)
    pub pairing_pin: String,
    /// TCP port the accessory server should listen on
    pub server_port: u16,
    /// Bumped whenever the service/characteristic layout changes
    pub config_version: u16,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            // Timing
            poll_interval_ms: 1000, // 1 Hz, matches door travel timescale
            relay_pulse_ms: 500,

            // Accessory identity
            accessory_name: "GARAGE DOOR".to_string(),
            pairing_pin: "111-11-111".to_string(),
            server_port: 811,
            config_version: 1,
        }
    }
}

impl DoorConfig {
    /// Range-check a config before persisting or applying it.
    ///
    /// Rejects values that would make the control loop spin or the relay
    /// pulse too short for the motor controller to register.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.poll_interval_ms < 100 {
            return Err("poll_interval_ms below 100ms");
        }
        if self.relay_pulse_ms < 50 || self.relay_pulse_ms > 5000 {
            return Err("relay_pulse_ms outside 50..=5000ms");
        }
        if self.accessory_name.is_empty() {
            return Err("accessory_name empty");
        }
        if self.pairing_pin.len() != 10 {
            return Err("pairing_pin must be XXX-XX-XXX");
        }
        Ok(())
    }
}
