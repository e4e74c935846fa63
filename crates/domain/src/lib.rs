//! # greenhouse-domain
//!
//! Pure domain model for the greenhouse automation gateway.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **sensor readings** and the partial updates that mutate them
//! - Define **setpoints** and the shared tolerance band
//! - Define the six **actuators** and their feedback flags
//! - Define **alarms** and their evaluation
//! - Define the **mode switches** and the **automatic control** rules
//! - Define the **tags** published on the address space
//! - Define **history entries** and their persisted layout
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod actuator;
pub mod alarm;
pub mod control;
pub mod history;
pub mod mode;
pub mod process_image;
pub mod sensor;
pub mod setpoint;
pub mod tag;
