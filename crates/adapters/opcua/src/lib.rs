//! # greenhouse-adapter-opcua
//!
//! OPC UA adapter: publishes every greenhouse tag as a variable of a single
//! `Estufa` object and lets supervisory clients write setpoints, modes and
//! one-shot commands.
//!
//! ## Responsibilities
//! - Build an anonymous, unsecured OPC UA server from configuration
//! - Register the namespace and create one variable per tag
//! - Implement the `AddressSpace` port over the server's address space
//! - Run the server on a dedicated thread
//!
//! ## Dependency rule
//! Same as other adapters: depends on `greenhouse-app` and `greenhouse-domain`.

pub mod address_space;
pub mod config;
pub mod error;
mod nodes;
pub mod server;

pub use address_space::OpcUaAddressSpace;
pub use config::OpcUaConfig;
pub use error::OpcUaError;
pub use server::GreenhouseServer;
