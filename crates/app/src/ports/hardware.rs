//! Hardware port: the capability to drive a physical output.

use greenhouse_domain::actuator::Actuator;
use greenhouse_domain::error::GreenhouseError;

/// Drives the relay of an actuator high or low.
///
/// Implementations live in the GPIO adapter: one talks to real pins, the
/// other only logs. The backend is chosen once at startup.
pub trait OutputPort: Send {
    /// Drive the output of `actuator` high (`true`) or low (`false`).
    ///
    /// # Errors
    ///
    /// Returns [`GreenhouseError::Hardware`] when the output cannot be
    /// written.
    fn write(&mut self, actuator: Actuator, on: bool) -> Result<(), GreenhouseError>;
}

impl<T: OutputPort + ?Sized> OutputPort for Box<T> {
    fn write(&mut self, actuator: Actuator, on: bool) -> Result<(), GreenhouseError> {
        (**self).write(actuator, on)
    }
}
