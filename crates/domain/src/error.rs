//! Common error types used across the workspace.
//!
//! Every adapter defines its own typed error and converts it into
//! [`GreenhouseError`] when crossing a port boundary.

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Base error returned by port implementations and application services.
#[derive(Debug, thiserror::Error)]
pub enum GreenhouseError {
    /// A name or value did not satisfy a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// Writing a physical output failed.
    #[error("hardware error")]
    Hardware(#[source] BoxedSource),

    /// Reading or writing an address-space variable failed.
    #[error("address space error")]
    AddressSpace(#[source] BoxedSource),

    /// The pub/sub transport failed.
    #[error("transport error")]
    Transport(#[source] BoxedSource),

    /// Persisting a snapshot failed.
    #[error("storage error")]
    Storage(#[source] BoxedSource),
}

/// Domain validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The name does not match any of the six known actuators.
    #[error("unknown actuator {0:?}")]
    UnknownActuator(String),

    /// The tag cannot be written from the remote side.
    #[error("tag {0} is read-only")]
    ReadOnlyTag(String),

    /// The value type does not fit the tag.
    #[error("tag {0} does not accept this value type")]
    WrongValueType(String),
}
