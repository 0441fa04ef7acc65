//! Garage door opener firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  DoorSensorBank    ActuatorAdapter    LogEventSink           │
//! │  (DoorSensorPort)  (ActuatorPort)     (EventSink)            │
//! │  NvsAdapter        ConsoleServer      ConsoleNotifier        │
//! │  (ConfigPort)      (AccessoryServer)  (NotifyPort)           │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │  DoorMonitor (poll · derive · edge-detect)         │      │
//! │  │  Characteristic bridge (read / write / subscribe)  │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The monitor loop runs on the main task; the accessory server drives
//! the bridge handlers from its own threads through [`DoorShared`].

#![deny(unused_must_use)]

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use garagedoor::adapters::console_server::{ConsoleNotifier, ConsoleServer};
use garagedoor::adapters::device_id;
use garagedoor::adapters::hardware::ActuatorAdapter;
use garagedoor::adapters::log_sink::LogEventSink;
use garagedoor::adapters::nvs::NvsAdapter;
use garagedoor::app::ports::{ActuatorPort, ConfigPort};
use garagedoor::app::service::DoorMonitor;
use garagedoor::config::DoorConfig;
use garagedoor::door::DoorShared;
use garagedoor::drivers::relay::RelayDriver;
use garagedoor::drivers::status_led::IndicatorLed;
use garagedoor::hap::bridge::{build_accessory, Notifier, MANUFACTURER};
use garagedoor::hap::registry::{AccessoryInfo, NotifyPort};
use garagedoor::hap::{AccessoryCategory, AccessoryServer};
use garagedoor::pins;
use garagedoor::sensors::DoorSensorBank;

/// Raised only by shutdown paths; in production the monitor polls forever.
static CANCEL: AtomicBool = AtomicBool::new(false);

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("garage opener v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let nvs = match NvsAdapter::new() {
        Ok(n) => n,
        Err(e) => {
            warn!("NVS init failed ({e}), running with defaults and no persistence");
            return run_with(DoorConfig::default());
        }
    };
    let config = match nvs.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("NVS config load failed ({e}), using defaults");
            DoorConfig::default()
        }
    };
    let config = match config.validate() {
        Ok(()) => config,
        Err(reason) => {
            warn!("stored config invalid ({reason}), using defaults");
            DoorConfig::default()
        }
    };

    run_with(config)
}

fn run_with(config: DoorConfig) -> Result<()> {
    let peripherals = Peripherals::take().context("peripherals already taken")?;

    // ── 3. GPIO wiring (assignments in `pins`) ────────────────
    info!(
        "inputs: sw1=GPIO{} sw2=GPIO{} button=GPIO{} | outputs: relay=GPIO{} led=GPIO{}",
        pins::SWITCH1_GPIO,
        pins::SWITCH2_GPIO,
        pins::OBSTRUCTION_GPIO,
        pins::RELAY_GPIO,
        pins::INDICATOR_LED_GPIO,
    );
    let mut switch1 = PinDriver::input(peripherals.pins.gpio22)?;
    switch1.set_pull(Pull::Up)?;
    let mut switch2 = PinDriver::input(peripherals.pins.gpio23)?;
    switch2.set_pull(Pull::Up)?;
    let mut button = PinDriver::input(peripherals.pins.gpio0)?;
    button.set_pull(Pull::Up)?;

    let relay_pin = PinDriver::output(peripherals.pins.gpio4)?;
    let led_pin = PinDriver::output(peripherals.pins.gpio2)?;

    let mut sensors = DoorSensorBank::new(switch1, switch2, button);
    let actuator = ActuatorAdapter::new(
        RelayDriver::new(relay_pin, FreeRtos, config.relay_pulse_ms),
        IndicatorLed::new(led_pin),
    );
    let actuator: Arc<Mutex<dyn ActuatorPort + Send>> = Arc::new(Mutex::new(actuator));

    // ── 4. Shared context + notify path ───────────────────────
    let shared = Arc::new(DoorShared::new());
    let notify_port: Arc<dyn NotifyPort> = Arc::new(ConsoleNotifier::new());
    let notifier = Notifier::new(Arc::clone(&shared), notify_port);

    // ── 5. Accessory identity + registration ──────────────────
    let mac = device_id::read_mac();
    let id = device_id::accessory_id(&mac);
    info!("accessory id: {id}");

    let accessory = build_accessory(
        AccessoryInfo {
            name: config.accessory_name.clone(),
            id,
            pairing_pin: config.pairing_pin.clone(),
            vendor: MANUFACTURER,
            category: AccessoryCategory::GarageDoorOpener,
            port: config.server_port,
            config_version: config.config_version,
        },
        Arc::clone(&shared),
        notifier.clone(),
        actuator,
    );

    let mut server = ConsoleServer::new();
    server
        .register_accessory(accessory)
        .context("accessory registration failed")?;

    // ── 6. Monitor loop (runs until CANCEL, i.e. forever) ─────
    let mut sink = LogEventSink::new();
    let mut monitor = DoorMonitor::new(shared, notifier, &config);
    monitor.run(&mut sensors, &mut sink, &CANCEL);

    Ok(())
}
