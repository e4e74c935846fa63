//! Sensor readings: the latest value received for every sensor channel.
//!
//! Analog channels start out absent and only get a value once the first
//! message carrying them arrives. The two reservoir level switches start
//! out `false`.

use crate::setpoint::ControlledVariable;

/// One of the six sensor channels published by the field nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorChannel {
    Temperature,
    Humidity,
    Light,
    SoilMoisture,
    LowLevel,
    HighLevel,
}

impl SensorChannel {
    pub const ALL: [Self; 6] = [
        Self::Temperature,
        Self::Humidity,
        Self::Light,
        Self::SoilMoisture,
        Self::LowLevel,
        Self::HighLevel,
    ];

    /// Name used on the address space and in persisted artifacts.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Temperature => ControlledVariable::Temperature.wire_name(),
            Self::Humidity => ControlledVariable::Humidity.wire_name(),
            Self::Light => ControlledVariable::Light.wire_name(),
            Self::SoilMoisture => ControlledVariable::SoilMoisture.wire_name(),
            Self::LowLevel => "nivel_baixo",
            Self::HighLevel => "nivel_alto",
        }
    }

    /// Field name carried in the inbound telemetry payload.
    #[must_use]
    pub fn payload_key(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Light => "light",
            Self::SoilMoisture => "soil_moisture",
            Self::LowLevel => "nivel_baixo",
            Self::HighLevel => "nivel_alto",
        }
    }

    /// The controlled variable backing an analog channel, `None` for the
    /// level switches.
    #[must_use]
    pub fn controlled_variable(self) -> Option<ControlledVariable> {
        match self {
            Self::Temperature => Some(ControlledVariable::Temperature),
            Self::Humidity => Some(ControlledVariable::Humidity),
            Self::Light => Some(ControlledVariable::Light),
            Self::SoilMoisture => Some(ControlledVariable::SoilMoisture),
            Self::LowLevel | Self::HighLevel => None,
        }
    }
}

/// A single decoded field of an inbound telemetry message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorUpdate {
    /// New analog value; `None` clears the reading.
    Analog(ControlledVariable, Option<f64>),
    LowLevel(bool),
    HighLevel(bool),
}

/// Latest known value of every sensor channel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorReading {
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub light: Option<f64>,
    pub soil_moisture: Option<f64>,
    /// Reservoir low-level switch.
    pub low_level: bool,
    /// Reservoir high-level switch.
    pub high_level: bool,
}

impl SensorReading {
    /// Current value of an analog channel, if one was ever received.
    #[must_use]
    pub fn analog(&self, variable: ControlledVariable) -> Option<f64> {
        match variable {
            ControlledVariable::Temperature => self.temperature,
            ControlledVariable::Humidity => self.humidity,
            ControlledVariable::Light => self.light,
            ControlledVariable::SoilMoisture => self.soil_moisture,
        }
    }

    /// Merge one decoded field; every other channel keeps its value.
    pub fn apply(&mut self, update: SensorUpdate) {
        match update {
            SensorUpdate::Analog(variable, value) => {
                let slot = match variable {
                    ControlledVariable::Temperature => &mut self.temperature,
                    ControlledVariable::Humidity => &mut self.humidity,
                    ControlledVariable::Light => &mut self.light,
                    ControlledVariable::SoilMoisture => &mut self.soil_moisture,
                };
                *slot = value;
            }
            SensorUpdate::LowLevel(on) => self.low_level = on,
            SensorUpdate::HighLevel(on) => self.high_level = on,
        }
    }
}
