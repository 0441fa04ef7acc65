//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the door monitor: sensor fusion, edge-triggered
//! change notification, and the periodic poll loop. All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
