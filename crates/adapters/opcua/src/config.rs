//! OPC UA server configuration.

use serde::Deserialize;

/// Configuration for the OPC UA endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpcUaConfig {
    /// Serve the address space over OPC UA. When disabled the gateway keeps
    /// an in-memory address space instead.
    pub enabled: bool,
    /// Interface to bind to.
    pub host: String,
    /// TCP port to listen on.
    pub port: u16,
    /// Endpoint path appended to `opc.tcp://host:port`.
    pub path: String,
    /// Application name advertised to clients.
    pub application_name: String,
    /// Namespace URI registered for the greenhouse variables.
    pub namespace: String,
    /// Name of the object holding every variable.
    pub object_name: String,
    /// Directory holding the server certificate store.
    pub pki_dir: String,
}

impl OpcUaConfig {
    /// Full endpoint URL, e.g. `opc.tcp://0.0.0.0:4840/estufa/`.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!("opc.tcp://{}:{}{}", self.host, self.port, self.path)
    }
}

impl Default for OpcUaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "0.0.0.0".to_string(),
            port: 4840,
            path: "/estufa/".to_string(),
            application_name: "Estufa Inteligente - OPC UA".to_string(),
            namespace: "EstufaInteligente".to_string(),
            object_name: "Estufa".to_string(),
            pki_dir: "pki".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = OpcUaConfig::default();
        assert!(config.enabled);
        assert_eq!(config.endpoint_url(), "opc.tcp://0.0.0.0:4840/estufa/");
        assert_eq!(config.application_name, "Estufa Inteligente - OPC UA");
        assert_eq!(config.namespace, "EstufaInteligente");
        assert_eq!(config.object_name, "Estufa");
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            enabled = false
            host = "127.0.0.1"
            port = 4841
            path = "/greenhouse/"
        "#;
        let config: OpcUaConfig = toml::from_str(toml).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.endpoint_url(), "opc.tcp://127.0.0.1:4841/greenhouse/");
        assert_eq!(config.namespace, "EstufaInteligente");
    }
}
