//! OPC UA adapter error types.

use greenhouse_domain::error::GreenhouseError;

/// Errors specific to the OPC UA adapter.
#[derive(Debug, thiserror::Error)]
pub enum OpcUaError {
    /// The server configuration was rejected by the OPC UA stack.
    #[error("invalid OPC UA server configuration")]
    InvalidConfig,

    /// The namespace could not be registered.
    #[error("failed to register namespace {0:?}")]
    Namespace(String),

    /// A node could not be created in the address space.
    #[error("failed to create node {0}")]
    NodeCreation(String),

    /// The variable backing a tag does not exist.
    #[error("unknown variable {0}")]
    UnknownNode(String),

    /// The server thread could not be spawned.
    #[error("failed to spawn OPC UA server thread")]
    Thread(#[source] std::io::Error),

    /// A remote client stored a value the gateway cannot interpret.
    #[error("unsupported value in variable {0}")]
    UnsupportedValue(String),
}

impl OpcUaError {
    /// Convert into a [`GreenhouseError::AddressSpace`] for propagation
    /// across port boundaries.
    #[must_use]
    pub fn into_domain(self) -> GreenhouseError {
        GreenhouseError::AddressSpace(Box::new(self))
    }
}

impl From<OpcUaError> for GreenhouseError {
    fn from(err: OpcUaError) -> Self {
        err.into_domain()
    }
}
