//! Ports module for the Upgrade Registry.

pub mod inbound;

pub use inbound::HeightGate;
