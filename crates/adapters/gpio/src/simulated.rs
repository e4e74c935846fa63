//! Logging-only outputs for benches without relays.

use std::collections::HashMap;

use greenhouse_app::ports::OutputPort;
use greenhouse_domain::actuator::Actuator;
use greenhouse_domain::error::GreenhouseError;

/// Records the last level written to each output and logs every write.
#[derive(Debug, Default)]
pub struct SimulatedOutputs {
    levels: HashMap<Actuator, bool>,
}

impl SimulatedOutputs {
    /// Last level written to the output of `actuator`; low if never written.
    #[must_use]
    pub fn level(&self, actuator: Actuator) -> bool {
        self.levels.get(&actuator).copied().unwrap_or(false)
    }
}

impl OutputPort for SimulatedOutputs {
    fn write(&mut self, actuator: Actuator, on: bool) -> Result<(), GreenhouseError> {
        tracing::info!(
            actuator = %actuator,
            pin = actuator.pin(),
            level = if on { "HIGH" } else { "LOW" },
            "simulated output"
        );
        self.levels.insert(actuator, on);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_remember_last_level() {
        let mut outputs = SimulatedOutputs::default();
        outputs.write(Actuator::Fan, true).unwrap();
        outputs.write(Actuator::Fan, false).unwrap();
        outputs.write(Actuator::Valve, true).unwrap();

        assert!(!outputs.level(Actuator::Fan));
        assert!(outputs.level(Actuator::Valve));
        assert!(!outputs.level(Actuator::Pump));
    }

    #[test]
    fn should_work_through_boxed_port() {
        let mut port: Box<dyn OutputPort> = Box::new(SimulatedOutputs::default());
        assert!(port.write(Actuator::EmergencyCutoff, true).is_ok());
    }
}
