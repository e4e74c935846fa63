//! History entries: the flattened snapshot persisted after every cycle.
//!
//! The serialized form is a single flat JSON object:
//!
//! | Key | Type |
//! |-----|------|
//! | `timestamp` | `"YYYY-MM-DD HH:MM:SS"`, local time |
//! | `temperatura`, `umidade`, `luminosidade`, `umidade_solo` | number or `null` |
//! | `nivel_baixo`, `nivel_alto` | boolean |
//! | `<actuator>` | `0` / `1` |
//! | `<actuator>_fb_ativado`, `<actuator>_fb_desativado` | `0` / `1` |
//! | `alarme_<variable>_baixo`, `alarme_<variable>_alto` | `0` / `1` |

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::actuator::{Actuator, FeedbackKind};
use crate::alarm::AlarmBound;
use crate::process_image::ProcessImage;
use crate::sensor::SensorChannel;
use crate::setpoint::ControlledVariable;
use crate::time::{self, Timestamp};

/// Immutable snapshot of the process image at a cycle boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    recorded_at: Timestamp,
    image: ProcessImage,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(recorded_at: Timestamp, image: ProcessImage) -> Self {
        Self { recorded_at, image }
    }

    #[must_use]
    pub fn image(&self) -> &ProcessImage {
        &self.image
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

impl Serialize for HistoryEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let image = &self.image;
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry("timestamp", &time::format_local(self.recorded_at))?;

        for variable in ControlledVariable::ALL {
            map.serialize_entry(variable.wire_name(), &image.readings.analog(variable))?;
        }
        map.serialize_entry(
            SensorChannel::LowLevel.wire_name(),
            &image.readings.low_level,
        )?;
        map.serialize_entry(
            SensorChannel::HighLevel.wire_name(),
            &image.readings.high_level,
        )?;

        for (actuator, on) in image.actuators.iter() {
            map.serialize_entry(actuator.wire_name(), &flag(on))?;
        }

        for actuator in Actuator::ALL {
            let feedback = image.actuators.feedback(actuator);
            for kind in FeedbackKind::ALL {
                map.serialize_entry(&kind.feedback_name(actuator), &flag(feedback.get(kind)))?;
            }
        }

        for variable in ControlledVariable::ALL {
            let alarm = image.alarms.get(variable);
            for bound in AlarmBound::ALL {
                map.serialize_entry(&bound.alarm_name(variable), &flag(alarm.get(bound)))?;
            }
        }

        map.end()
    }
}
