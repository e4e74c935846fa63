//! MQTT ingestion configuration.

use serde::Deserialize;

/// Configuration for the sensor telemetry subscription.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Topic the field nodes publish their readings on.
    pub topic: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Keep polling the broker after a connection error.
    pub reconnect: bool,
    /// Pause between reconnection attempts, in seconds.
    pub reconnect_delay_secs: u64,
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "greenhouse-gateway".to_string(),
            topic: "estufa/sensores".to_string(),
            keep_alive_secs: 60,
            reconnect: true,
            reconnect_delay_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = MqttConfig::default();
        assert_eq!(config.broker_host, "localhost");
        assert_eq!(config.broker_port, 1883);
        assert_eq!(config.client_id, "greenhouse-gateway");
        assert_eq!(config.topic, "estufa/sensores");
        assert_eq!(config.keep_alive_secs, 60);
        assert!(config.reconnect);
        assert_eq!(config.reconnect_delay_secs, 5);
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            broker_host = "mqtt.example.com"
            broker_port = 8883
            client_id = "estufa-2"
            topic = "farm/sensors"
            keep_alive_secs = 30
            reconnect = false
            reconnect_delay_secs = 10
        "#;
        let config: MqttConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.broker_host, "mqtt.example.com");
        assert_eq!(config.broker_port, 8883);
        assert_eq!(config.client_id, "estufa-2");
        assert_eq!(config.topic, "farm/sensors");
        assert_eq!(config.keep_alive_secs, 30);
        assert!(!config.reconnect);
        assert_eq!(config.reconnect_delay_secs, 10);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let toml = r#"broker_host = "192.168.1.100""#;
        let config: MqttConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.broker_host, "192.168.1.100");
        assert_eq!(config.broker_port, 1883);
        assert_eq!(config.topic, "estufa/sensores");
    }
}
