//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `greenhouse.toml` in the working directory, or the file named by
//! `GREENHOUSE_CONFIG`. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use greenhouse_adapter_gpio::{HardwareBackend, HardwareConfig};
use greenhouse_adapter_mqtt::MqttConfig;
use greenhouse_adapter_opcua::OpcUaConfig;
use greenhouse_adapter_storage_json::StorageConfig;
use greenhouse_app::services::control_cycle::CycleTiming;
use greenhouse_domain::setpoint::Setpoints;
use serde::Deserialize;

const DEFAULT_PATH: &str = "greenhouse.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sensor telemetry subscription.
    pub mqtt: MqttConfig,
    /// OPC UA endpoint.
    pub opcua: OpcUaConfig,
    /// Actuator output backend.
    pub hardware: HardwareConfig,
    /// Control loop cadence and initial setpoints.
    pub control: ControlConfig,
    /// Persisted artifacts.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Control loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Pause between two cycles, in seconds.
    pub cycle_interval_secs: u64,
    /// Pause after a failed cycle, in seconds.
    pub recovery_interval_secs: u64,
    /// Setpoints in force until a remote client changes them.
    pub setpoints: Setpoints,
}

impl ControlConfig {
    #[must_use]
    pub fn timing(&self) -> CycleTiming {
        CycleTiming {
            interval: Duration::from_secs(self.cycle_interval_secs),
            recovery: Duration::from_secs(self.recovery_interval_secs),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
    /// Also write logs to a daily rolling file.
    pub to_file: bool,
    /// Directory holding the log files.
    pub directory: PathBuf,
    /// File name prefix, completed with the date and `.log`.
    pub file_prefix: String,
    /// Rolled files kept before the oldest is deleted.
    pub max_files: usize,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("GREENHOUSE_CONFIG")
            .map_or_else(|_| PathBuf::from(DEFAULT_PATH), PathBuf::from);
        let mut config = Self::from_file(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = var("GREENHOUSE_MQTT_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Some(val) = var("GREENHOUSE_MQTT_PORT") {
            self.mqtt.broker_port = parse_port("GREENHOUSE_MQTT_PORT", &val)?;
        }
        if let Some(val) = var("GREENHOUSE_MQTT_TOPIC") {
            self.mqtt.topic = val;
        }
        if let Some(val) = var("GREENHOUSE_OPCUA_PORT") {
            self.opcua.port = parse_port("GREENHOUSE_OPCUA_PORT", &val)?;
        }
        if let Some(val) = var("GREENHOUSE_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(val);
        }
        if let Some(val) = var("GREENHOUSE_HARDWARE") {
            self.hardware.backend = val
                .parse::<HardwareBackend>()
                .map_err(ConfigError::Validation)?;
        }
        if let Some(val) = var("GREENHOUSE_LOG_DIR") {
            self.logging.directory = PathBuf::from(val);
        }
        if let Some(val) = var("GREENHOUSE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mqtt.broker_host.trim().is_empty() {
            return invalid("mqtt.broker_host must not be empty");
        }
        if self.mqtt.broker_port == 0 {
            return invalid("mqtt.broker_port must be non-zero");
        }
        if self.mqtt.topic.trim().is_empty() {
            return invalid("mqtt.topic must not be empty");
        }
        // rumqttc refuses empty ids and ids starting with whitespace
        if self.mqtt.client_id.is_empty() || self.mqtt.client_id.starts_with(char::is_whitespace)
        {
            return invalid("mqtt.client_id must not be empty or start with whitespace");
        }
        if self.opcua.port == 0 {
            return invalid("opcua.port must be non-zero");
        }
        if !self.opcua.path.starts_with('/') {
            return invalid("opcua.path must start with '/'");
        }
        if self.control.cycle_interval_secs == 0 {
            return invalid("control.cycle_interval_secs must be non-zero");
        }
        if self.logging.to_file && self.logging.max_files == 0 {
            return invalid("logging.max_files must be non-zero");
        }
        if self.logging.to_file && self.logging.file_prefix.trim().is_empty() {
            return invalid("logging.file_prefix must not be empty");
        }
        Ok(())
    }
}

fn invalid(message: &str) -> Result<(), ConfigError> {
    Err(ConfigError::Validation(message.to_string()))
}

fn parse_port(key: &str, value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("{key} is not a valid port: {value:?}")))
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            cycle_interval_secs: 60,
            recovery_interval_secs: 5,
            setpoints: Setpoints::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "greenhoused=info,greenhouse=info".to_string(),
            to_file: true,
            directory: PathBuf::from("logs"),
            file_prefix: "greenhoused".to_string(),
            max_files: 3,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
