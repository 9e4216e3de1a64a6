//! Module parameters: decimal cap and the issue/mint fees.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::{Coins, KeyTable, NATIVE_DENOM};
use thiserror::Error;

pub const PARAM_KEY_MAX_DECIMAL: &str = "paramMaxDecimal";
pub const PARAM_KEY_ISSUE_FEE: &str = "paramIssueFee";
pub const PARAM_KEY_MINT_FEE: &str = "paramMintFee";

pub const DEFAULT_MAX_DECIMAL: i8 = 10;
pub const DEFAULT_ISSUE_FEE: u128 = 1_000_000_000;
pub const DEFAULT_MINT_FEE: u128 = 100_000_000;

/// Keys accepted by the asset parameter subspace.
pub fn param_key_table() -> KeyTable {
    KeyTable::new()
        .with_key(PARAM_KEY_MAX_DECIMAL)
        .with_key(PARAM_KEY_ISSUE_FEE)
        .with_key(PARAM_KEY_MINT_FEE)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    #[error("token decimal must not be negative")]
    NegativeMaxDecimal,

    #[error("issue fee must be positive")]
    NonPositiveIssueFee,

    #[error("mint fee must be positive")]
    NonPositiveMintFee,

    #[error("issue fee {0} is not a valid coin set")]
    InvalidIssueFee(String),

    #[error("mint fee {0} is not a valid coin set")]
    InvalidMintFee(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    #[serde(rename = "param_max_decimal")]
    pub max_decimal: i8,
    #[serde(rename = "param_issue_fee")]
    pub issue_fee: Coins,
    #[serde(rename = "param_mint_fee")]
    pub mint_fee: Coins,
}

impl Params {
    pub fn new(max_decimal: i8, issue_fee: Coins, mint_fee: Coins) -> Self {
        Self {
            max_decimal,
            issue_fee,
            mint_fee,
        }
    }

    /// Params whose fees are denominated in the native token.
    pub fn native(max_decimal: i8, issue_fee: u128, mint_fee: u128) -> Self {
        Self::new(max_decimal, native_fee(issue_fee), native_fee(mint_fee))
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.max_decimal < 0 {
            return Err(ParamsError::NegativeMaxDecimal);
        }
        if !self.issue_fee.is_valid() {
            return Err(ParamsError::InvalidIssueFee(self.issue_fee.to_string()));
        }
        if !self.issue_fee.is_all_positive() {
            return Err(ParamsError::NonPositiveIssueFee);
        }
        if !self.mint_fee.is_valid() {
            return Err(ParamsError::InvalidMintFee(self.mint_fee.to_string()));
        }
        if !self.mint_fee.is_all_positive() {
            return Err(ParamsError::NonPositiveMintFee);
        }
        Ok(())
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::native(DEFAULT_MAX_DECIMAL, DEFAULT_ISSUE_FEE, DEFAULT_MINT_FEE)
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Asset parameters:")?;
        writeln!(f, "  MaxDecimal:   {}", self.max_decimal)?;
        writeln!(f, "  IssueFee:     {}", self.issue_fee)?;
        write!(f, "  MintFee:      {}", self.mint_fee)
    }
}

/// A fee of `amount` native units. `NATIVE_DENOM` is a valid denom, so this
/// cannot fail.
pub fn native_fee(amount: u128) -> Coins {
    match Coins::single(NATIVE_DENOM, amount) {
        Ok(coins) => coins,
        Err(e) => panic!("native denom rejected: {e}"),
    }
}
