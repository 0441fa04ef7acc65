//! Garage door opener firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by the `espidf`
//! feature within each module, so the domain core builds and tests on
//! the host.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod door;
pub mod error;
pub mod hap;

pub mod pins;

pub mod adapters;
pub mod drivers;
pub mod sensors;
