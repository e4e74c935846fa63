//! Threshold alarms: one below/above pair per controlled variable.

use crate::sensor::SensorReading;
use crate::setpoint::{BandPosition, ControlledVariable, Setpoints};

/// Which edge of the setpoint band an alarm watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlarmBound {
    Below,
    Above,
}

impl AlarmBound {
    pub const ALL: [Self; 2] = [Self::Below, Self::Above];

    #[must_use]
    pub fn wire_suffix(self) -> &'static str {
        match self {
            Self::Below => "baixo",
            Self::Above => "alto",
        }
    }

    /// Alarm variable name, e.g. `alarme_temperatura_alto`.
    #[must_use]
    pub fn alarm_name(self, variable: ControlledVariable) -> String {
        format!("alarme_{}_{}", variable.wire_name(), self.wire_suffix())
    }
}

/// Alarm pair for a single variable.
///
/// Both flags are `false` when there is no reading. The two flags are
/// mutually exclusive since a value cannot be on both sides of the band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlarmFlags {
    pub below: bool,
    pub above: bool,
}

impl AlarmFlags {
    #[must_use]
    pub fn evaluate(value: Option<f64>, setpoint: f64) -> Self {
        match value.map(|v| BandPosition::of(v, setpoint)) {
            Some(BandPosition::Below) => Self {
                below: true,
                above: false,
            },
            Some(BandPosition::Above) => Self {
                below: false,
                above: true,
            },
            Some(BandPosition::Within) | None => Self::default(),
        }
    }

    #[must_use]
    pub fn get(self, bound: AlarmBound) -> bool {
        match bound {
            AlarmBound::Below => self.below,
            AlarmBound::Above => self.above,
        }
    }
}

/// Alarm flags for every controlled variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Alarms {
    pub temperature: AlarmFlags,
    pub humidity: AlarmFlags,
    pub light: AlarmFlags,
    pub soil_moisture: AlarmFlags,
}

impl Alarms {
    /// Recompute every alarm pair from the readings and setpoints.
    #[must_use]
    pub fn evaluate(readings: &SensorReading, setpoints: &Setpoints) -> Self {
        let flags =
            |variable| AlarmFlags::evaluate(readings.analog(variable), setpoints.get(variable));
        Self {
            temperature: flags(ControlledVariable::Temperature),
            humidity: flags(ControlledVariable::Humidity),
            light: flags(ControlledVariable::Light),
            soil_moisture: flags(ControlledVariable::SoilMoisture),
        }
    }

    #[must_use]
    pub fn get(&self, variable: ControlledVariable) -> AlarmFlags {
        match variable {
            ControlledVariable::Temperature => self.temperature,
            ControlledVariable::Humidity => self.humidity,
            ControlledVariable::Light => self.light,
            ControlledVariable::SoilMoisture => self.soil_moisture,
        }
    }

    /// Whether any alarm is currently raised.
    #[must_use]
    pub fn any(&self) -> bool {
        ControlledVariable::ALL
            .iter()
            .any(|&v| self.get(v).below || self.get(v).above)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_clear_both_flags_when_reading_absent() {
        let flags = AlarmFlags::evaluate(None, 30.0);
        assert_eq!(flags, AlarmFlags::default());
    }

    #[test]
    fn should_raise_above_when_reading_exceeds_band() {
        let flags = AlarmFlags::evaluate(Some(32.0), 30.0);
        assert!(flags.above);
        assert!(!flags.below);
    }

    #[test]
    fn should_raise_below_when_reading_under_band() {
        let flags = AlarmFlags::evaluate(Some(40.0), 45.0);
        assert!(flags.below);
        assert!(!flags.above);
    }

    #[test]
    fn should_not_raise_on_band_edges() {
        assert_eq!(AlarmFlags::evaluate(Some(29.0), 30.0), AlarmFlags::default());
        assert_eq!(AlarmFlags::evaluate(Some(31.0), 30.0), AlarmFlags::default());
    }

    #[test]
    fn should_never_raise_both_flags() {
        let setpoint = 50.0;
        let mut value = 40.0;
        while value <= 60.0 {
            let flags = AlarmFlags::evaluate(Some(value), setpoint);
            assert!(!(flags.below && flags.above), "both raised at {value}");
            value += 0.25;
        }
    }

    #[test]
    fn should_evaluate_every_variable_independently() {
        let readings = SensorReading {
            temperature: Some(32.0),
            soil_moisture: Some(40.0),
            ..SensorReading::default()
        };
        let alarms = Alarms::evaluate(&readings, &Setpoints::default());

        assert!(alarms.temperature.above);
        assert!(alarms.soil_moisture.below);
        assert_eq!(alarms.humidity, AlarmFlags::default());
        assert_eq!(alarms.light, AlarmFlags::default());
        assert!(alarms.any());
    }

    #[test]
    fn should_name_alarm_variables() {
        assert_eq!(
            AlarmBound::Above.alarm_name(ControlledVariable::Temperature),
            "alarme_temperatura_alto"
        );
        assert_eq!(
            AlarmBound::Below.alarm_name(ControlledVariable::SoilMoisture),
            "alarme_umidade_solo_baixo"
        );
    }
}
