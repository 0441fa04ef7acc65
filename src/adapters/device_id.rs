//! Device identity derived from the ESP32 factory MAC address.
//!
//! The accessory id is the colon-separated MAC (`AA:BB:CC:DD:EE:FF`),
//! stable across reboots (factory-burned eFuse MAC). It doubles as the
//! serial number in the accessory-information service.

/// Fixed-size accessory id string: "AA:BB:CC:DD:EE:FF" (17 chars).
pub type AccessoryIdString = heapless::String<17>;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

/// Read the factory MAC address from eFuse.
#[cfg(feature = "espidf")]
pub fn read_mac() -> MacAddress {
    let mut mac: MacAddress = [0u8; 6];
    unsafe {
        esp_idf_svc::sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }
    mac
}

/// Simulation: returns a deterministic fake MAC.
#[cfg(not(feature = "espidf"))]
pub fn read_mac() -> MacAddress {
    [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE]
}

/// Format the MAC as the accessory id / serial number.
pub fn accessory_id(mac: &MacAddress) -> AccessoryIdString {
    let mut id = AccessoryIdString::new();
    use core::fmt::Write;
    let _ = write!(
        id,
        "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    );
    id
}
