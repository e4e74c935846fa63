//! Automatic control: bang-bang rules mapping readings to actuator states.
//!
//! Every rule is re-evaluated from scratch each cycle. A reading inside the
//! setpoint band leaves the actuator untouched, which gives hysteresis at
//! the band edges. Absent readings produce no decision.

use crate::actuator::Actuator;
use crate::process_image::ProcessImage;
use crate::setpoint::{BandPosition, ControlledVariable};

/// A desired actuator state produced by the automatic controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub actuator: Actuator,
    pub on: bool,
}

impl Decision {
    fn new(actuator: Actuator, on: bool) -> Self {
        Self { actuator, on }
    }
}

/// Compute the ordered list of decisions for this cycle.
///
/// Returns nothing in manual mode or when the system is disabled.
/// Decisions must be applied in order: when both level switches are set the
/// valve receives ON and then OFF, so the high-level switch wins.
#[must_use]
pub fn decide(image: &ProcessImage) -> Vec<Decision> {
    if !image.modes.automatic_control_active() {
        return Vec::new();
    }

    let readings = &image.readings;
    let position = |variable: ControlledVariable| {
        readings
            .analog(variable)
            .map(|value| BandPosition::of(value, image.setpoints.get(variable)))
    };

    let mut decisions = Vec::new();

    match position(ControlledVariable::SoilMoisture) {
        Some(BandPosition::Below) => decisions.push(Decision::new(Actuator::Pump, true)),
        Some(BandPosition::Above) => decisions.push(Decision::new(Actuator::Pump, false)),
        Some(BandPosition::Within) | None => {}
    }

    if readings.low_level {
        decisions.push(Decision::new(Actuator::Valve, true));
    }
    if readings.high_level {
        decisions.push(Decision::new(Actuator::Valve, false));
    }

    match position(ControlledVariable::Light) {
        Some(BandPosition::Below) => decisions.push(Decision::new(Actuator::GrowLight, true)),
        Some(BandPosition::Above) => decisions.push(Decision::new(Actuator::GrowLight, false)),
        Some(BandPosition::Within) | None => {}
    }

    // fan and exhaust always move together
    match position(ControlledVariable::Temperature) {
        Some(BandPosition::Above) => {
            decisions.push(Decision::new(Actuator::Fan, true));
            decisions.push(Decision::new(Actuator::Exhaust, true));
        }
        Some(BandPosition::Below) => {
            decisions.push(Decision::new(Actuator::Fan, false));
            decisions.push(Decision::new(Actuator::Exhaust, false));
        }
        Some(BandPosition::Within) | None => {}
    }

    decisions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::SensorReading;

    fn image_with(readings: SensorReading) -> ProcessImage {
        ProcessImage {
            readings,
            ..ProcessImage::default()
        }
    }

    fn final_state(decisions: &[Decision], actuator: Actuator) -> Option<bool> {
        decisions
            .iter()
            .rev()
            .find(|d| d.actuator == actuator)
            .map(|d| d.on)
    }

    #[test]
    fn should_run_pump_when_soil_is_dry() {
        let image = image_with(SensorReading {
            soil_moisture: Some(40.0),
            ..SensorReading::default()
        });
        assert_eq!(decide(&image), vec![Decision::new(Actuator::Pump, true)]);
    }

    #[test]
    fn should_stop_pump_when_soil_is_wet() {
        let image = image_with(SensorReading {
            soil_moisture: Some(50.0),
            ..SensorReading::default()
        });
        assert_eq!(decide(&image), vec![Decision::new(Actuator::Pump, false)]);
    }

    #[test]
    fn should_leave_pump_alone_inside_band() {
        let image = image_with(SensorReading {
            soil_moisture: Some(45.5),
            ..SensorReading::default()
        });
        assert!(decide(&image).is_empty());
    }

    #[test]
    fn should_couple_fan_and_exhaust_when_hot() {
        let image = image_with(SensorReading {
            temperature: Some(32.0),
            ..SensorReading::default()
        });
        assert_eq!(
            decide(&image),
            vec![
                Decision::new(Actuator::Fan, true),
                Decision::new(Actuator::Exhaust, true)
            ]
        );
    }

    #[test]
    fn should_couple_fan_and_exhaust_when_cold() {
        let image = image_with(SensorReading {
            temperature: Some(20.0),
            ..SensorReading::default()
        });
        let decisions = decide(&image);
        assert_eq!(final_state(&decisions, Actuator::Fan), Some(false));
        assert_eq!(final_state(&decisions, Actuator::Exhaust), Some(false));
    }

    #[test]
    fn should_switch_grow_light_around_band() {
        let dark = image_with(SensorReading {
            light: Some(100.0),
            ..SensorReading::default()
        });
        let bright = image_with(SensorReading {
            light: Some(900.0),
            ..SensorReading::default()
        });
        assert_eq!(final_state(&decide(&dark), Actuator::GrowLight), Some(true));
        assert_eq!(final_state(&decide(&bright), Actuator::GrowLight), Some(false));
    }

    #[test]
    fn should_refill_on_low_level() {
        let image = image_with(SensorReading {
            low_level: true,
            ..SensorReading::default()
        });
        assert_eq!(decide(&image), vec![Decision::new(Actuator::Valve, true)]);
    }

    #[test]
    fn should_close_valve_when_both_level_switches_set() {
        let image = image_with(SensorReading {
            low_level: true,
            high_level: true,
            ..SensorReading::default()
        });
        let decisions = decide(&image);
        assert_eq!(
            decisions,
            vec![
                Decision::new(Actuator::Valve, true),
                Decision::new(Actuator::Valve, false)
            ]
        );
        assert_eq!(final_state(&decisions, Actuator::Valve), Some(false));
    }

    #[test]
    fn should_decide_nothing_without_readings() {
        assert!(decide(&ProcessImage::default()).is_empty());
    }

    #[test]
    fn should_decide_nothing_in_manual_mode() {
        let mut image = image_with(SensorReading {
            temperature: Some(40.0),
            soil_moisture: Some(10.0),
            light: Some(0.0),
            low_level: true,
            ..SensorReading::default()
        });
        image.modes.manual_mode = true;
        assert!(decide(&image).is_empty());
    }

    #[test]
    fn should_decide_nothing_when_system_disabled() {
        let mut image = image_with(SensorReading {
            temperature: Some(40.0),
            ..SensorReading::default()
        });
        image.modes.system_enabled = false;
        assert!(decide(&image).is_empty());
    }

    #[test]
    fn should_never_touch_emergency_cutoff() {
        let image = image_with(SensorReading {
            temperature: Some(40.0),
            humidity: Some(10.0),
            light: Some(0.0),
            soil_moisture: Some(0.0),
            low_level: true,
            high_level: false,
        });
        assert!(decide(&image)
            .iter()
            .all(|d| d.actuator != Actuator::EmergencyCutoff));
    }
}
