//! # Barkis Ledger Test Suite
//!
//! End-to-end flows driven through [`node_runtime::App`], exactly as a
//! consensus engine would: genesis, then begin/deliver/end/commit per block.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # TestChain driver and message builders
//! └── integration/
//!     ├── token_lifecycle.rs   # Issue/Mint scenarios, fees, atomicity
//!     ├── upgrade_gating.rs    # Message/query gating, hooks, rule regimes
//!     └── genesis_flows.rs     # Genesis validation, export and re-import
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bk-tests
//! cargo test -p bk-tests integration::upgrade_gating::
//! ```

#[cfg(test)]
pub mod fixtures;
pub mod integration;
