//! # Genesis Module
//!
//! The application genesis document and its validation.
//!
//! ## Initialization Sequence
//!
//! 1. Read and parse the JSON document
//! 2. Validate the chain id, every balance, and the asset section
//! 3. Credit every balance (raising the total supply)
//! 4. Load asset tokens, then asset params
//! 5. Commit height 0

pub mod document;

pub use document::{AppGenesis, AppGenesisError};
