//! Console-backed accessory server adapter.
//!
//! Stands in for the real pairing/session/registry stack: registration is
//! logged, reads are served straight from the handlers, and notifications
//! are printed. A networked server crate would implement the same two
//! traits ([`AccessoryServer`] and [`NotifyPort`]) without touching the
//! bridge or the monitor.

use log::{debug, info};

use crate::hap::registry::{Accessory, AccessoryServer, NotifyPort, RegistryError};
use crate::hap::{SubscriberHandle, Value};

/// [`NotifyPort`] implementation that logs every delivered notification.
///
/// Constructed before registration (the bridge handlers capture it), so it
/// is a separate type from [`ConsoleServer`].
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotifyPort for ConsoleNotifier {
    fn notify(&self, subscriber: SubscriberHandle, value: Value) {
        info!("NOTIFY | sub={} value={}", subscriber.raw(), value);
    }
}

/// [`AccessoryServer`] implementation that logs the registered layout.
pub struct ConsoleServer {
    accessories: Vec<Accessory>,
}

impl ConsoleServer {
    pub fn new() -> Self {
        Self {
            accessories: Vec::new(),
        }
    }

    /// Number of registered accessories.
    pub fn accessory_count(&self) -> usize {
        self.accessories.len()
    }
}

impl AccessoryServer for ConsoleServer {
    fn register_accessory(&mut self, accessory: Accessory) -> Result<(), RegistryError> {
        if self
            .accessories
            .iter()
            .any(|a| a.info.id == accessory.info.id)
        {
            return Err(RegistryError::Rejected("duplicate accessory id"));
        }

        info!(
            "REGISTER | name={:?} id={} pin={} port={} cfg_v={}",
            accessory.info.name,
            accessory.info.id,
            accessory.info.pairing_pin,
            accessory.info.port,
            accessory.info.config_version,
        );
        for service in &accessory.services {
            info!(
                "  service {:?} ({} characteristics)",
                service.kind,
                service.characteristics.len()
            );
            for ch in &service.characteristics {
                debug!(
                    "    {:?} initial={} handler={}",
                    ch.kind,
                    ch.initial,
                    ch.handler.is_some()
                );
            }
        }

        self.accessories.push(accessory);
        Ok(())
    }
}
