//! Actuators: the six relay-driven outputs of the greenhouse.
//!
//! Each actuator carries its Raspberry Pi BCM pin. Feedback flags are
//! derived from the commanded state, so `activated == state` and
//! `deactivated == !state` hold for every snapshot.

use std::str::FromStr;

use crate::error::ValidationError;

/// One of the six physical outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actuator {
    /// Irrigation pump.
    Pump,
    /// Reservoir refill valve.
    Valve,
    GrowLight,
    Fan,
    Exhaust,
    EmergencyCutoff,
}

impl Actuator {
    pub const ALL: [Self; 6] = [
        Self::Pump,
        Self::Valve,
        Self::GrowLight,
        Self::Fan,
        Self::Exhaust,
        Self::EmergencyCutoff,
    ];

    /// Name used on the address space and in persisted artifacts.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Pump => "bomba",
            Self::Valve => "valvula",
            Self::GrowLight => "luminaria",
            Self::Fan => "ventilador",
            Self::Exhaust => "exaustor",
            Self::EmergencyCutoff => "emergencia",
        }
    }

    /// BCM pin number of the relay driving this actuator.
    #[must_use]
    pub fn pin(self) -> u8 {
        match self {
            Self::Pump => 17,
            Self::Valve => 25,
            Self::GrowLight => 27,
            Self::Fan => 22,
            Self::Exhaust => 23,
            Self::EmergencyCutoff => 24,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Pump => 0,
            Self::Valve => 1,
            Self::GrowLight => 2,
            Self::Fan => 3,
            Self::Exhaust => 4,
            Self::EmergencyCutoff => 5,
        }
    }
}

impl std::fmt::Display for Actuator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Actuator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.wire_name() == s)
            .ok_or_else(|| ValidationError::UnknownActuator(s.to_string()))
    }
}

/// Read-only feedback pair mirroring an actuator's last commanded state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub activated: bool,
    pub deactivated: bool,
}

/// Which half of the feedback pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    Activated,
    Deactivated,
}

impl FeedbackKind {
    pub const ALL: [Self; 2] = [Self::Activated, Self::Deactivated];

    /// Feedback variable name, e.g. `bomba_fb_ativado`.
    #[must_use]
    pub fn feedback_name(self, actuator: Actuator) -> String {
        let suffix = match self {
            Self::Activated => "ativado",
            Self::Deactivated => "desativado",
        };
        format!("{}_fb_{suffix}", actuator.wire_name())
    }
}

impl Feedback {
    #[must_use]
    pub fn get(self, kind: FeedbackKind) -> bool {
        match kind {
            FeedbackKind::Activated => self.activated,
            FeedbackKind::Deactivated => self.deactivated,
        }
    }
}

/// Commanded state of every actuator. All outputs start off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actuators {
    states: [bool; 6],
}

impl Actuators {
    #[must_use]
    pub fn is_on(&self, actuator: Actuator) -> bool {
        self.states[actuator.index()]
    }

    /// Record a new commanded state, returning the previous one.
    pub fn set(&mut self, actuator: Actuator, on: bool) -> bool {
        std::mem::replace(&mut self.states[actuator.index()], on)
    }

    #[must_use]
    pub fn feedback(&self, actuator: Actuator) -> Feedback {
        let on = self.is_on(actuator);
        Feedback {
            activated: on,
            deactivated: !on,
        }
    }

    /// Iterate over `(actuator, state)` in [`Actuator::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Actuator, bool)> + '_ {
        Actuator::ALL.into_iter().map(|a| (a, self.is_on(a)))
    }
}
