//! Actuator driver: the only path from a decision to a relay.

use greenhouse_domain::actuator::Actuator;

use crate::ports::OutputPort;
use crate::process_state::ProcessState;

/// Drives physical outputs and keeps the logical actuator state in sync.
///
/// The logical state is updated even when the physical write fails, so the
/// address space always shows the last commanded state.
pub struct ActuatorDriver<O> {
    output: O,
    state: ProcessState,
}

impl<O: OutputPort> ActuatorDriver<O> {
    pub fn new(output: O, state: ProcessState) -> Self {
        Self { output, state }
    }

    /// Drive every output low without touching the logical state.
    pub fn initialize(&mut self) {
        for actuator in Actuator::ALL {
            if let Err(err) = self.output.write(actuator, false) {
                tracing::error!(
                    actuator = %actuator,
                    pin = actuator.pin(),
                    error = %err,
                    "failed to initialize output"
                );
            }
        }
        tracing::info!("all outputs initialized low");
    }

    /// Switch `actuator` on or off.
    pub fn set(&mut self, actuator: Actuator, on: bool) {
        if let Err(err) = self.output.write(actuator, on) {
            tracing::error!(
                actuator = %actuator,
                pin = actuator.pin(),
                error = %err,
                "failed to write output"
            );
        }

        let before = self.state.update(|image| image.actuators.set(actuator, on));
        if before == on {
            tracing::debug!(actuator = %actuator, state = on, "actuator unchanged");
        } else {
            tracing::info!(actuator = %actuator, before, after = on, "actuator switched");
        }
    }

    /// Switch an actuator identified by its wire name. Unknown names are
    /// logged and ignored.
    pub fn set_by_name(&mut self, name: &str, on: bool) {
        match name.parse::<Actuator>() {
            Ok(actuator) => self.set(actuator, on),
            Err(err) => tracing::error!(error = %err, "ignoring actuator command"),
        }
    }

    pub fn all_off(&mut self) {
        for actuator in Actuator::ALL {
            self.set(actuator, false);
        }
    }
}
