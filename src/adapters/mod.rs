//! Adapters — implementations of the port traits for the outside world.
//!
//! Everything ESP-IDF-specific is guarded by the `espidf` feature so the
//! whole domain core builds and tests on the host.

pub mod console_server;
pub mod device_id;
pub mod hardware;
pub mod log_sink;
pub mod nvs;
