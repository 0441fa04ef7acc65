//! GPIO pin assignments for the garage opener board.
//!
//! Wiring:
//! - Two reed switches report door position (see [`crate::door`] for the
//!   level-to-state truth table).
//! - The obstruction button is active-low with an external pull-up.
//! - The relay output pulses the door motor controller.
//! - The onboard LED mirrors the last commanded target state.

/// Onboard blue LED — target-state indicator.
pub const INDICATOR_LED_GPIO: i32 = 2;

/// Reed switch 1 — door position input.
pub const SWITCH1_GPIO: i32 = 22;

/// Reed switch 2 — door position input.
pub const SWITCH2_GPIO: i32 = 23;

/// Obstruction button — low when pressed.
pub const OBSTRUCTION_GPIO: i32 = 0;

/// Motor relay — active high, pulsed to toggle the door.
pub const RELAY_GPIO: i32 = 4;
