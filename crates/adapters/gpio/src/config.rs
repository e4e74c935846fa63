//! Hardware backend configuration.

use serde::Deserialize;

/// Which implementation drives the actuator outputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardwareBackend {
    /// Raspberry Pi GPIO through `rppal`.
    #[default]
    Gpio,
    /// Log every write, touch no hardware.
    Simulated,
}

impl std::str::FromStr for HardwareBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpio" => Ok(Self::Gpio),
            "simulated" => Ok(Self::Simulated),
            other => Err(format!("unknown hardware backend {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    pub backend: HardwareBackend,
}
