//! Cross-crate flows through the application.

mod genesis_flows;
mod token_lifecycle;
mod upgrade_gating;
