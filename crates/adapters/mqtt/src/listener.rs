//! Sensor listener: the background task consuming telemetry messages.

use std::time::Duration;

use greenhouse_app::process_state::ProcessState;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use tokio::task::JoinHandle;

use crate::config::MqttConfig;
use crate::error::MqttError;
use crate::payload;

/// Capacity of the request channel between the client and its event loop.
const REQUEST_CAPACITY: usize = 10;

/// Subscribes to the sensor topic and merges every message into the
/// process state.
///
/// The subscription is renewed on every broker acknowledgement, so a
/// reconnect after an outage resumes delivery without intervention.
pub struct SensorListener {
    config: MqttConfig,
    state: ProcessState,
}

impl SensorListener {
    #[must_use]
    pub fn new(config: MqttConfig, state: ProcessState) -> Self {
        Self { config, state }
    }

    /// Spawn the listener on the current runtime.
    #[must_use]
    pub fn start(config: MqttConfig, state: ProcessState) -> JoinHandle<()> {
        tokio::spawn(Self::new(config, state).run())
    }

    fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(
            self.config.client_id.clone(),
            self.config.broker_host.clone(),
            self.config.broker_port,
        );
        options.set_keep_alive(Duration::from_secs(u64::from(self.config.keep_alive_secs)));
        options
    }

    /// Decode one payload and merge it into the process state.
    ///
    /// Returns how many sensor fields were updated.
    ///
    /// # Errors
    ///
    /// Returns the decode error; the process state is left untouched.
    pub fn handle_payload(&self, raw: &[u8]) -> Result<usize, MqttError> {
        let updates = payload::decode(raw)?;
        let count = updates.len();
        self.state.update(|image| {
            for update in updates {
                image.readings.apply(update);
            }
        });
        Ok(count)
    }

    async fn run(self) {
        let (client, mut eventloop) = AsyncClient::new(self.options(), REQUEST_CAPACITY);
        tracing::info!(
            host = %self.config.broker_host,
            port = self.config.broker_port,
            topic = %self.config.topic,
            "connecting to MQTT broker"
        );

        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    tracing::info!(topic = %self.config.topic, "connected to MQTT broker");
                    if let Err(err) = client
                        .try_subscribe(self.config.topic.clone(), QoS::AtMostOnce)
                        .map_err(MqttError::Client)
                    {
                        tracing::warn!(%err, "failed to subscribe to sensor topic");
                    }
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    match self.handle_payload(&publish.payload) {
                        Ok(count) => {
                            tracing::debug!(topic = %publish.topic, fields = count, "sensor data received");
                        }
                        Err(err) => {
                            tracing::warn!(topic = %publish.topic, %err, "discarding sensor message");
                        }
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    let err = MqttError::Connection(err);
                    if !self.config.reconnect {
                        tracing::error!(%err, "MQTT connection lost, sensor listener stopped");
                        return;
                    }
                    tracing::warn!(
                        %err,
                        retry_secs = self.config.reconnect_delay_secs,
                        "MQTT connection lost, retrying"
                    );
                    tokio::time::sleep(Duration::from_secs(self.config.reconnect_delay_secs)).await;
                }
            }
        }
    }
}
