//! Ports module for the asset ledger
//!
//! Outbound (SPI) traits for the collaborators the module drives.

pub mod outbound;

pub use outbound::SupplyKeeper;
