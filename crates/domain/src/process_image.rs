//! Process image: the complete state of the greenhouse at one instant.

use crate::actuator::Actuators;
use crate::alarm::Alarms;
use crate::error::ValidationError;
use crate::mode::ModeFlags;
use crate::sensor::{SensorChannel, SensorReading};
use crate::setpoint::Setpoints;
use crate::tag::{Tag, TagValue};

/// Readings, setpoints, actuators, alarms and modes bundled together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessImage {
    pub readings: SensorReading,
    pub setpoints: Setpoints,
    pub actuators: Actuators,
    pub alarms: Alarms,
    pub modes: ModeFlags,
}

impl ProcessImage {
    /// An image with no readings, every actuator off, and the given setpoints.
    #[must_use]
    pub fn with_setpoints(setpoints: Setpoints) -> Self {
        Self {
            setpoints,
            ..Self::default()
        }
    }

    /// Recompute the alarm flags from the current readings and setpoints.
    pub fn refresh_alarms(&mut self) {
        self.alarms = Alarms::evaluate(&self.readings, &self.setpoints);
    }

    /// Local value of a tag. Commands always read `false` locally since they
    /// only exist as pulses on the remote side.
    #[must_use]
    pub fn tag_value(&self, tag: Tag) -> TagValue {
        match tag {
            Tag::Sensor(channel) => match channel {
                SensorChannel::LowLevel => self.readings.low_level.into(),
                SensorChannel::HighLevel => self.readings.high_level.into(),
                analog => analog
                    .controlled_variable()
                    .and_then(|v| self.readings.analog(v))
                    .into(),
            },
            Tag::Setpoint(variable) => self.setpoints.get(variable).into(),
            Tag::ActuatorState(actuator) => self.actuators.is_on(actuator).into(),
            Tag::Command(..) => false.into(),
            Tag::Feedback(actuator, kind) => self.actuators.feedback(actuator).get(kind).into(),
            Tag::Alarm(variable, bound) => self.alarms.get(variable).get(bound).into(),
            Tag::Mode(mode) => self.modes.get(mode).into(),
        }
    }

    /// Apply a value pulled from the address space to a setpoint or mode tag.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ReadOnlyTag`] for tags that are not pulled
    /// inward (sensors, states, feedback, alarms, commands), and
    /// [`ValidationError::WrongValueType`] when the value does not fit.
    pub fn apply_remote(&mut self, tag: Tag, value: TagValue) -> Result<(), ValidationError> {
        match tag {
            Tag::Setpoint(variable) => {
                let value = value
                    .as_f64()
                    .ok_or_else(|| ValidationError::WrongValueType(tag.name()))?;
                self.setpoints.set(variable, value);
                Ok(())
            }
            Tag::Mode(mode) => {
                let value = value
                    .as_bool()
                    .ok_or_else(|| ValidationError::WrongValueType(tag.name()))?;
                self.modes.set(mode, value);
                Ok(())
            }
            _ => Err(ValidationError::ReadOnlyTag(tag.name())),
        }
    }
}
