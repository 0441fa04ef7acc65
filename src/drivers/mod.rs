//! Actuator drivers — dumb outputs with no policy of their own.

pub mod relay;
pub mod status_led;
