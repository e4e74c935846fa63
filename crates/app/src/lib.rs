//! # greenhouse-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `AddressSpace`: read and write the variables exposed to remote clients
//!   - `OutputPort`: drive a physical relay
//!   - `HistoryStore`: persist one snapshot per cycle
//! - Hold the shared **process state** injected into every task
//! - Provide an **in-memory address space** that needs no network server
//! - Implement the services:
//!   - `ActuatorDriver`: the only path to the outputs
//!   - `AddressSpaceSync`: push, pull and one-shot command handling
//!   - `ControlCycle`: the periodic loop
//!
//! ## Dependency rule
//! Depends on `greenhouse-domain` only (plus `tokio::time` for the loop).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod address_space;
pub mod ports;
pub mod process_state;
pub mod services;
