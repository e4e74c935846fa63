//! Setpoints: the target value of every controlled variable.
//!
//! Each setpoint defines an acceptable band of `setpoint ± TOLERANCE`.
//! Readings inside the band cause no alarm and no control action.

use serde::{Deserialize, Serialize};

/// Half-width of the acceptable band around every setpoint.
pub const TOLERANCE: f64 = 1.0;

/// A variable that has both a setpoint and an alarm pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlledVariable {
    Temperature,
    Humidity,
    Light,
    SoilMoisture,
}

impl ControlledVariable {
    /// Every controlled variable, in evaluation order.
    pub const ALL: [Self; 4] = [
        Self::Temperature,
        Self::Humidity,
        Self::Light,
        Self::SoilMoisture,
    ];

    /// Name used on the address space and in persisted artifacts.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Temperature => "temperatura",
            Self::Humidity => "umidade",
            Self::Light => "luminosidade",
            Self::SoilMoisture => "umidade_solo",
        }
    }

    /// Name of the writable setpoint variable (`temperatura_setpoint`, …).
    #[must_use]
    pub fn setpoint_name(self) -> String {
        format!("{}_setpoint", self.wire_name())
    }
}

impl std::fmt::Display for ControlledVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Where a reading sits relative to a setpoint band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPosition {
    Below,
    Within,
    Above,
}

impl BandPosition {
    /// Classify `value` against `setpoint ± TOLERANCE`.
    ///
    /// The band edges themselves count as [`Within`](Self::Within).
    #[must_use]
    pub fn of(value: f64, setpoint: f64) -> Self {
        if value < setpoint - TOLERANCE {
            Self::Below
        } else if value > setpoint + TOLERANCE {
            Self::Above
        } else {
            Self::Within
        }
    }
}

/// One setpoint per [`ControlledVariable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Setpoints {
    /// Target air temperature in °C.
    pub temperature: f64,
    /// Target relative humidity in %RH.
    pub humidity: f64,
    /// Target light intensity.
    pub light: f64,
    /// Target soil moisture in %.
    pub soil_moisture: f64,
}

impl Default for Setpoints {
    fn default() -> Self {
        Self {
            temperature: 30.0,
            humidity: 70.0,
            light: 300.0,
            soil_moisture: 45.0,
        }
    }
}

impl Setpoints {
    #[must_use]
    pub fn get(&self, variable: ControlledVariable) -> f64 {
        match variable {
            ControlledVariable::Temperature => self.temperature,
            ControlledVariable::Humidity => self.humidity,
            ControlledVariable::Light => self.light,
            ControlledVariable::SoilMoisture => self.soil_moisture,
        }
    }

    pub fn set(&mut self, variable: ControlledVariable, value: f64) {
        let slot = match variable {
            ControlledVariable::Temperature => &mut self.temperature,
            ControlledVariable::Humidity => &mut self.humidity,
            ControlledVariable::Light => &mut self.light,
            ControlledVariable::SoilMoisture => &mut self.soil_moisture,
        };
        *slot = value;
    }
}
