//! Domain module for the asset ledger
//!
//! Token records, module parameters, messages and their validation rules.

pub mod errors;
pub mod keys;
pub mod msgs;
pub mod params;
pub mod token;
pub mod validation;

pub use errors::*;
pub use keys::*;
pub use msgs::{AssetMsg, IssueMsg, MintMsg};
pub use params::{
    native_fee, param_key_table, Params, ParamsError, DEFAULT_ISSUE_FEE, DEFAULT_MAX_DECIMAL,
    DEFAULT_MINT_FEE,
};
pub use token::Token;
