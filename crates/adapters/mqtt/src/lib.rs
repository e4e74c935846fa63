//! # greenhouse-adapter-mqtt
//!
//! MQTT adapter: feeds field-node telemetry into the process state.
//!
//! ## Responsibilities
//! - Connect to the MQTT broker and subscribe to the sensor topic
//! - Decode JSON telemetry into partial sensor updates
//! - Merge each update into the shared process state
//! - Survive broker outages without stopping the gateway
//!
//! ## Dependency rule
//! Same as other adapters: depends on `greenhouse-app` and `greenhouse-domain`.

pub mod config;
pub mod error;
pub mod listener;
pub mod payload;

pub use config::MqttConfig;
pub use error::MqttError;
pub use listener::SensorListener;
