//! GPIO adapter error types.

use greenhouse_domain::actuator::Actuator;
use greenhouse_domain::error::GreenhouseError;

/// Errors specific to the GPIO adapter.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// The GPIO peripheral or a pin could not be opened or written.
    #[error("GPIO error")]
    Gpio(#[from] rppal::gpio::Error),

    /// The pin of this actuator was not available at startup.
    #[error("output {actuator} (BCM {pin}) is unavailable")]
    PinUnavailable {
        /// Actuator whose output is missing.
        actuator: Actuator,
        /// BCM pin number.
        pin: u8,
    },
}

impl HardwareError {
    /// Convert into a [`GreenhouseError::Hardware`] for propagation across
    /// port boundaries.
    #[must_use]
    pub fn into_domain(self) -> GreenhouseError {
        GreenhouseError::Hardware(Box::new(self))
    }
}

impl From<HardwareError> for GreenhouseError {
    fn from(err: HardwareError) -> Self {
        err.into_domain()
    }
}
