//! Tags: the named variables published on the address space.
//!
//! The tag set is closed: 6 sensors, 4 setpoints, 6 actuator states,
//! 12 one-shot commands, 12 feedback flags, 8 alarms and 2 modes.
//! Remote clients may only write [`Access::ReadWrite`] tags.

use crate::actuator::{Actuator, FeedbackKind};
use crate::alarm::AlarmBound;
use crate::mode::Mode;
use crate::sensor::SensorChannel;
use crate::setpoint::ControlledVariable;

/// Remote access rights of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

impl Access {
    #[must_use]
    pub fn is_writable(self) -> bool {
        matches!(self, Self::ReadWrite)
    }
}

/// Direction of a one-shot actuator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    TurnOn,
    TurnOff,
}

impl CommandKind {
    /// `TurnOn` before `TurnOff`, so a simultaneous pulse resolves to off.
    pub const ALL: [Self; 2] = [Self::TurnOn, Self::TurnOff];

    #[must_use]
    pub fn target_state(self) -> bool {
        matches!(self, Self::TurnOn)
    }
}

/// Scalar carried by a tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TagValue {
    /// No value yet (an analog sensor that never reported).
    Empty,
    Boolean(bool),
    Double(f64),
}

impl TagValue {
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(b),
            Self::Empty | Self::Double(_) => None,
        }
    }

    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(v),
            Self::Empty | Self::Boolean(_) => None,
        }
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<Option<f64>> for TagValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Empty, Self::Double)
    }
}

/// A single address-space variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Sensor(SensorChannel),
    Setpoint(ControlledVariable),
    ActuatorState(Actuator),
    Command(Actuator, CommandKind),
    Feedback(Actuator, FeedbackKind),
    Alarm(ControlledVariable, AlarmBound),
    Mode(Mode),
}

impl Tag {
    /// Browse name of the variable.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Self::Sensor(channel) => channel.wire_name().to_string(),
            Self::Setpoint(variable) => variable.setpoint_name(),
            Self::ActuatorState(actuator) => format!("{actuator}_state"),
            Self::Command(actuator, CommandKind::TurnOn) => format!("{actuator}_cmd_on"),
            Self::Command(actuator, CommandKind::TurnOff) => format!("{actuator}_cmd_off"),
            Self::Feedback(actuator, kind) => kind.feedback_name(actuator),
            Self::Alarm(variable, bound) => bound.alarm_name(variable),
            Self::Mode(mode) => mode.wire_name().to_string(),
        }
    }

    #[must_use]
    pub fn access(self) -> Access {
        match self {
            Self::Setpoint(_) | Self::Command(..) | Self::Mode(_) => Access::ReadWrite,
            Self::Sensor(_) | Self::ActuatorState(_) | Self::Feedback(..) | Self::Alarm(..) => {
                Access::ReadOnly
            }
        }
    }

    /// Every tag, in publication order.
    #[must_use]
    pub fn catalogue() -> Vec<Self> {
        let mut tags: Vec<Self> = SensorChannel::ALL.into_iter().map(Self::Sensor).collect();
        tags.extend(ControlledVariable::ALL.into_iter().map(Self::Setpoint));
        for actuator in Actuator::ALL {
            tags.push(Self::Command(actuator, CommandKind::TurnOn));
            tags.push(Self::Command(actuator, CommandKind::TurnOff));
            tags.push(Self::ActuatorState(actuator));
        }
        for actuator in Actuator::ALL {
            tags.extend(
                FeedbackKind::ALL
                    .into_iter()
                    .map(|kind| Self::Feedback(actuator, kind)),
            );
        }
        for variable in ControlledVariable::ALL {
            tags.extend(
                AlarmBound::ALL
                    .into_iter()
                    .map(|bound| Self::Alarm(variable, bound)),
            );
        }
        tags.extend(Mode::ALL.into_iter().map(Self::Mode));
        tags
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
