//! Application services: the use-cases run by the control loop.
//!
//! Each service accepts port implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod actuator_driver;
pub mod address_space_sync;
pub mod control_cycle;
