//! Telemetry payload decoding.
//!
//! A message is a JSON object, optionally wrapped in a `sensor_data` key.
//! Every recognised field becomes one [`SensorUpdate`]; unknown fields are
//! ignored and missing fields leave the previous reading untouched.
//!
//! Analog fields accept numbers and numeric strings; `null` clears the
//! reading. Level switches accept booleans, numbers (non-zero is `true`) and
//! the strings `"true"`, `"1"` and `"on"`; `null` reads as `false`. A field
//! of any other type is skipped with a warning.

use greenhouse_domain::sensor::{SensorChannel, SensorUpdate};
use serde_json::{Map, Value};

use crate::error::MqttError;

const WRAPPER_KEY: &str = "sensor_data";

/// Decode a raw MQTT payload into sensor updates.
///
/// # Errors
///
/// Returns [`MqttError::PayloadParse`] when the payload is not JSON and
/// [`MqttError::PayloadShape`] when it is not an object.
pub fn decode(payload: &[u8]) -> Result<Vec<SensorUpdate>, MqttError> {
    let value: Value = serde_json::from_slice(payload).map_err(MqttError::PayloadParse)?;
    let Value::Object(mut object) = value else {
        return Err(MqttError::PayloadShape("expected a JSON object"));
    };
    let fields = match object.remove(WRAPPER_KEY) {
        Some(Value::Object(inner)) => inner,
        Some(_) => return Err(MqttError::PayloadShape("sensor_data is not an object")),
        None => object,
    };
    Ok(decode_fields(&fields))
}

fn decode_fields(fields: &Map<String, Value>) -> Vec<SensorUpdate> {
    SensorChannel::ALL
        .into_iter()
        .filter_map(|channel| {
            let value = fields.get(channel.payload_key())?;
            let update = decode_field(channel, value);
            if update.is_none() {
                tracing::warn!(
                    field = channel.payload_key(),
                    %value,
                    "ignoring sensor field with unexpected type"
                );
            }
            update
        })
        .collect()
}

fn decode_field(channel: SensorChannel, value: &Value) -> Option<SensorUpdate> {
    match channel.controlled_variable() {
        Some(variable) => analog(value).map(|reading| SensorUpdate::Analog(variable, reading)),
        None => {
            let on = level(value)?;
            Some(match channel {
                SensorChannel::HighLevel => SensorUpdate::HighLevel(on),
                _ => SensorUpdate::LowLevel(on),
            })
        }
    }
}

/// `Some(None)` clears the reading, `None` rejects the field.
fn analog(value: &Value) -> Option<Option<f64>> {
    match value {
        Value::Null => Some(None),
        Value::Number(n) => n.as_f64().map(Some),
        Value::String(s) => s.trim().parse::<f64>().ok().map(Some),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

fn level(value: &Value) -> Option<bool> {
    match value {
        Value::Null => Some(false),
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => {
            let s = s.trim();
            Some(["true", "1", "on"].iter().any(|t| s.eq_ignore_ascii_case(t)))
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}
