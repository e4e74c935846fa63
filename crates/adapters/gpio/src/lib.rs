//! # greenhouse-adapter-gpio
//!
//! GPIO adapter: implements the `OutputPort` for the six actuator relays.
//!
//! ## Responsibilities
//! - Drive the Raspberry Pi BCM pins through `rppal`
//! - Offer a logging-only backend for benches without hardware
//! - Select the backend from configuration at startup
//!
//! ## Dependency rule
//! Same as other adapters: depends on `greenhouse-app` and `greenhouse-domain`.

pub mod config;
pub mod error;
pub mod rpi;
pub mod simulated;

use greenhouse_app::ports::OutputPort;

pub use config::{HardwareBackend, HardwareConfig};
pub use error::HardwareError;
pub use rpi::GpioOutputs;
pub use simulated::SimulatedOutputs;

/// Open the outputs selected by `config`.
#[must_use]
pub fn open(config: &HardwareConfig) -> Box<dyn OutputPort> {
    match config.backend {
        HardwareBackend::Gpio => Box::new(GpioOutputs::open()),
        HardwareBackend::Simulated => Box::new(SimulatedOutputs::default()),
    }
}
