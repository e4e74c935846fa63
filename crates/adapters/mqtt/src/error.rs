//! MQTT adapter error types.

use greenhouse_domain::error::GreenhouseError;

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client rejected a request.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// The connection to the broker failed.
    #[error("MQTT connection error")]
    Connection(#[source] rumqttc::ConnectionError),

    /// Failed to parse an incoming MQTT payload as JSON.
    #[error("failed to parse MQTT payload")]
    PayloadParse(#[source] serde_json::Error),

    /// The payload is valid JSON but not a telemetry object.
    #[error("unexpected MQTT payload: {0}")]
    PayloadShape(&'static str),
}

impl MqttError {
    /// Convert into a [`GreenhouseError::Transport`] for propagation across
    /// port boundaries.
    #[must_use]
    pub fn into_domain(self) -> GreenhouseError {
        GreenhouseError::Transport(Box::new(self))
    }
}

impl From<MqttError> for GreenhouseError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}
