//! Registration boundary to the external accessory server.
//!
//! The server (pairing, session encryption, characteristic registry) is a
//! collaborator supplied by the host application. The firmware hands it a
//! fully-built [`Accessory`] — identity plus services plus per-characteristic
//! capability handlers — and receives change-notification delivery through
//! [`NotifyPort`].

use crate::error::BridgeError;

use super::{AccessoryCategory, CharacteristicKind, ServiceKind, SubscriberHandle, Value};

// ---------------------------------------------------------------------------
// Capability interface per characteristic
// ---------------------------------------------------------------------------

/// Read / write / subscribe capabilities of one characteristic.
///
/// The server invokes these synchronously on its own thread of control.
/// Defaults make a characteristic read-only and non-subscribable; each
/// concrete handler overrides exactly the capabilities it supports.
pub trait CharacteristicHandler: Send + Sync {
    /// Return the current value.
    fn read(&self) -> Value;

    /// Apply an externally written value.
    ///
    /// Fails with [`BridgeError::ReadOnly`] unless the characteristic
    /// declares write support, or [`BridgeError::InvalidValue`] when the
    /// payload is outside the declared value domain.
    fn write(&self, value: Value) -> Result<(), BridgeError> {
        let _ = value;
        Err(BridgeError::ReadOnly)
    }

    /// Install (`Some`) or clear (`None`) this characteristic's subscriber.
    ///
    /// At most one subscriber is held at a time; a new handle silently
    /// replaces the previous one. Non-subscribable characteristics ignore
    /// the call.
    fn set_subscriber(&self, subscriber: Option<SubscriberHandle>) {
        let _ = subscriber;
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// One characteristic as handed to the server: kind tag, initial value,
/// and the capability handler (absent for static metadata).
pub struct CharacteristicDescriptor {
    pub kind: CharacteristicKind,
    pub initial: Value,
    pub handler: Option<Box<dyn CharacteristicHandler>>,
}

/// A service grouping related characteristics.
pub struct ServiceDescriptor {
    pub kind: ServiceKind,
    pub characteristics: Vec<CharacteristicDescriptor>,
}

/// Static accessory identity presented during pairing/discovery.
#[derive(Debug, Clone)]
pub struct AccessoryInfo {
    pub name: String,
    /// Device id derived from the factory MAC ("AA:BB:CC:DD:EE:FF").
    pub id: heapless::String<17>,
    pub pairing_pin: String,
    pub vendor: &'static str,
    pub category: AccessoryCategory,
    pub port: u16,
    pub config_version: u16,
}

/// A complete accessory ready for registration.
pub struct Accessory {
    pub info: AccessoryInfo,
    pub services: Vec<ServiceDescriptor>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Incremental accessory assembly.
///
/// Services are added one at a time and each characteristic carries its
/// own typed handler.
pub struct AccessoryBuilder {
    info: AccessoryInfo,
    services: Vec<ServiceDescriptor>,
}

impl AccessoryBuilder {
    pub fn new(info: AccessoryInfo) -> Self {
        Self {
            info,
            services: Vec::new(),
        }
    }

    /// Open a new service; characteristics are added through the returned
    /// scope and committed when it is finished.
    pub fn service(mut self, kind: ServiceKind) -> ServiceBuilder {
        self.services.push(ServiceDescriptor {
            kind,
            characteristics: Vec::new(),
        });
        ServiceBuilder { accessory: self }
    }

    pub fn build(self) -> Accessory {
        Accessory {
            info: self.info,
            services: self.services,
        }
    }
}

/// Characteristic-level scope of [`AccessoryBuilder::service`].
pub struct ServiceBuilder {
    accessory: AccessoryBuilder,
}

impl ServiceBuilder {
    /// Static metadata characteristic — fixed value, no handler.
    pub fn static_characteristic(mut self, kind: CharacteristicKind, value: Value) -> Self {
        self.push(CharacteristicDescriptor {
            kind,
            initial: value,
            handler: None,
        });
        self
    }

    /// Live characteristic backed by a capability handler.
    pub fn characteristic(
        mut self,
        kind: CharacteristicKind,
        initial: Value,
        handler: Box<dyn CharacteristicHandler>,
    ) -> Self {
        self.push(CharacteristicDescriptor {
            kind,
            initial,
            handler: Some(handler),
        });
        self
    }

    /// Close this service and return to the accessory scope.
    pub fn finish(self) -> AccessoryBuilder {
        self.accessory
    }

    fn push(&mut self, descriptor: CharacteristicDescriptor) {
        // service() always pushes before handing out a ServiceBuilder.
        if let Some(service) = self.accessory.services.last_mut() {
            service.characteristics.push(descriptor);
        }
    }
}

// ---------------------------------------------------------------------------
// Server-side ports
// ---------------------------------------------------------------------------

/// Errors the accessory server can report during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Server refused the accessory (duplicate id, resource exhaustion…).
    Rejected(&'static str),
    /// Server is not in a state that accepts registrations.
    Unavailable,
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Rejected(msg) => write!(f, "registration rejected: {msg}"),
            Self::Unavailable => write!(f, "accessory server unavailable"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Registration interface of the external accessory server.
pub trait AccessoryServer {
    /// Register a complete accessory (identity + services + handlers).
    fn register_accessory(&mut self, accessory: Accessory) -> Result<(), RegistryError>;
}

/// Change-notification delivery into the external server.
///
/// Fire-and-forget: no delivery confirmation, no retry, no buffering.
/// If the server drops the event the bridge has no knowledge of it.
pub trait NotifyPort: Send + Sync {
    fn notify(&self, subscriber: SubscriberHandle, value: Value);
}
