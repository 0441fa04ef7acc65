//! Accessory-protocol data model and the boundary to the external server.
//!
//! The pairing/session/registry machinery lives in a collaborator crate
//! behind the [`AccessoryServer`](registry::AccessoryServer) and
//! [`NotifyPort`](registry::NotifyPort) traits; this module owns only the
//! typed value model and the service/characteristic descriptors that the
//! firmware registers.

pub mod bridge;
pub mod registry;

pub use registry::{AccessoryServer, NotifyPort};

use core::fmt;

// ---------------------------------------------------------------------------
// Typed characteristic values
// ---------------------------------------------------------------------------

/// A characteristic value on the wire.
///
/// The tag lets each handler declare its value domain and reject anything
/// outside it instead of reinterpreting a raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Small unsigned integer (door state codes, target codes).
    UInt(u8),
    /// Boolean (obstruction detected, identify probe).
    Bool(bool),
    /// Metadata string (manufacturer, model, serial, …).
    Str(String),
}

impl Value {
    /// Integer payload, if this is a `UInt`.
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Characteristic / service identity
// ---------------------------------------------------------------------------

/// Kind tag of a characteristic within a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacteristicKind {
    // Accessory information service
    Identify,
    Manufacturer,
    Model,
    Name,
    SerialNumber,
    FirmwareRevision,

    // Garage door opener service
    CurrentDoorState,
    TargetDoorState,
    ObstructionDetected,
}

/// Kind tag of a registered service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    AccessoryInformation,
    GarageDoorOpener,
}

/// Accessory category advertised during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessoryCategory {
    GarageDoorOpener,
}

// ---------------------------------------------------------------------------
// Subscriber handle
// ---------------------------------------------------------------------------

/// Opaque token identifying a remote observer of one characteristic.
///
/// Minted by the accessory server when a controller enables event
/// notifications; the bridge stores it and hands it back verbatim on
/// every notify. The numeric payload has no meaning to the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberHandle(u64);

impl SubscriberHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}
