//! Raspberry Pi outputs through `rppal`.

use std::collections::HashMap;

use greenhouse_app::ports::OutputPort;
use greenhouse_domain::actuator::Actuator;
use greenhouse_domain::error::GreenhouseError;
use rppal::gpio::{Gpio, OutputPin};

use crate::error::HardwareError;

/// One output pin per actuator.
///
/// Pins that could not be claimed at startup stay missing and every write
/// to them fails with [`HardwareError::PinUnavailable`]. Pins keep their
/// level when the process exits.
pub struct GpioOutputs {
    pins: HashMap<Actuator, OutputPin>,
}

impl GpioOutputs {
    /// Claim every actuator pin as an output driven low.
    #[must_use]
    pub fn open() -> Self {
        let gpio = match Gpio::new() {
            Ok(gpio) => gpio,
            Err(err) => {
                tracing::error!(
                    error = %HardwareError::from(err),
                    "GPIO unavailable, every output degraded"
                );
                return Self {
                    pins: HashMap::new(),
                };
            }
        };

        let mut pins = HashMap::new();
        for actuator in Actuator::ALL {
            match gpio.get(actuator.pin()) {
                Ok(pin) => {
                    let mut output = pin.into_output_low();
                    output.set_reset_on_drop(false);
                    pins.insert(actuator, output);
                }
                Err(err) => tracing::error!(
                    actuator = %actuator,
                    pin = actuator.pin(),
                    error = %HardwareError::from(err),
                    "output degraded"
                ),
            }
        }
        tracing::info!(available = pins.len(), "GPIO outputs ready");
        Self { pins }
    }
}

impl OutputPort for GpioOutputs {
    fn write(&mut self, actuator: Actuator, on: bool) -> Result<(), GreenhouseError> {
        let pin = self
            .pins
            .get_mut(&actuator)
            .ok_or(HardwareError::PinUnavailable {
                actuator,
                pin: actuator.pin(),
            })?;
        if on {
            pin.set_high();
        } else {
            pin.set_low();
        }
        Ok(())
    }
}
