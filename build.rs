fn main() {
    // Host builds (tests) have no ESP-IDF toolchain; only emit the
    // espidf link/env metadata when building for the device.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
