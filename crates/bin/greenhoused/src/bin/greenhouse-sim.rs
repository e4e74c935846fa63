//! Sensor simulator: publishes random greenhouse readings for bench tests.
//!
//! Connects to the same broker and topic as the gateway (honouring
//! `GREENHOUSE_MQTT_HOST`, `GREENHOUSE_MQTT_PORT` and `GREENHOUSE_MQTT_TOPIC`)
//! and publishes one message every five seconds until interrupted.

use std::time::Duration;

use anyhow::Context as _;
use greenhouse_adapter_mqtt::MqttConfig;
use rumqttc::{AsyncClient, MqttOptions, QoS};
use serde::Serialize;

const PUBLISH_INTERVAL: Duration = Duration::from_secs(5);
const SENSOR_ID: &str = "sim_01";

#[derive(Debug, Serialize)]
struct Message {
    sensor_id: &'static str,
    sensor_data: SensorData,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct SensorData {
    temperature: f64,
    humidity: f64,
    light: f64,
    water_level: f64,
}

/// Uniform sample in `[low, high)` rounded to two decimals.
fn uniform(low: f64, high: f64) -> f64 {
    let value = low + fastrand::f64() * (high - low);
    (value * 100.0).round() / 100.0
}

impl Message {
    fn random() -> Self {
        Self {
            sensor_id: SENSOR_ID,
            sensor_data: SensorData {
                temperature: uniform(20.0, 35.0),
                humidity: uniform(40.0, 80.0),
                light: uniform(100.0, 1000.0),
                water_level: uniform(1.0, 20.0),
            },
            timestamp: chrono::Local::now().to_rfc3339(),
        }
    }
}

fn config_from_env() -> anyhow::Result<MqttConfig> {
    let mut config = MqttConfig {
        client_id: "greenhouse-sim".to_string(),
        ..MqttConfig::default()
    };
    if let Ok(host) = std::env::var("GREENHOUSE_MQTT_HOST") {
        config.broker_host = host;
    }
    if let Ok(port) = std::env::var("GREENHOUSE_MQTT_PORT") {
        config.broker_port = port
            .parse()
            .with_context(|| format!("invalid GREENHOUSE_MQTT_PORT {port:?}"))?;
    }
    if let Ok(topic) = std::env::var("GREENHOUSE_MQTT_TOPIC") {
        config.topic = topic;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("greenhouse_sim=info")),
        )
        .init();

    let config = config_from_env()?;
    let mut options = MqttOptions::new(
        config.client_id.clone(),
        config.broker_host.clone(),
        config.broker_port,
    );
    options.set_keep_alive(Duration::from_secs(u64::from(config.keep_alive_secs)));
    let (client, mut eventloop) = AsyncClient::new(options, 10);

    // the event loop must be polled for publishes to reach the broker
    let driver = tokio::spawn(async move {
        loop {
            if let Err(err) = eventloop.poll().await {
                tracing::warn!(%err, "MQTT connection error, retrying");
                tokio::time::sleep(PUBLISH_INTERVAL).await;
            }
        }
    });

    tracing::info!(topic = %config.topic, "publishing simulated sensor data");
    let mut ticker = tokio::time::interval(PUBLISH_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let message = Message::random();
                let payload = serde_json::to_vec(&message)?;
                match client.publish(config.topic.clone(), QoS::AtMostOnce, false, payload).await {
                    Ok(()) => tracing::info!(?message, "published"),
                    Err(err) => tracing::warn!(%err, "failed to publish"),
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("failed to listen for ctrl-c")?;
                break;
            }
        }
    }

    tracing::info!("stopping simulator");
    if let Err(err) = client.disconnect().await {
        tracing::debug!(%err, "disconnect failed");
    }
    driver.abort();
    Ok(())
}
