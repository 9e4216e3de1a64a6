//! # Token Validation Rules
//!
//! Height-gated checks shared by message validation, the handler and genesis
//! validation. Two regimes exist, switched by `TokenDesLenLimit`:
//!
//! | Rule | Legacy | After `TokenDesLenLimit` |
//! |------|--------|--------------------------|
//! | symbol length | `(0, 12]` | `[3, 12]` |
//! | description length | `<= 128` | `<= 1024` |
//!
//! Name length is fixed at `(0, 32]`. Symbol and name may not be the native
//! token's denom or display name.
//!
//! Stored tokens (genesis) are checked against the union of both regimes:
//! an exported ledger holds tokens issued under either one.

use bk_01_upgrade_registry::HeightGate;
use shared_types::{UpgradeName, NATIVE_DENOM, NATIVE_DENOM_NAME};

use super::errors::AssetError;
use super::keys::*;
use super::token::Token;

/// Symbol checks, in order: length (regime-dependent), reserved native
/// names (case-insensitive), lowercase ASCII letters only.
pub fn validate_symbol(symbol: &str, gate: &dyn HeightGate) -> Result<(), AssetError> {
    let len = symbol.len();
    if gate.is_upgrade_applied(UpgradeName::TokenDesLenLimit) {
        if !(MIN_TOKEN_SYMBOL_LENGTH..=MAX_TOKEN_SYMBOL_LENGTH).contains(&len) {
            return Err(AssetError::InvalidTokenSymbol(format!(
                "token symbol length should be in [{}, {}]",
                MIN_TOKEN_SYMBOL_LENGTH, MAX_TOKEN_SYMBOL_LENGTH
            )));
        }
    } else if len == 0 || len > MAX_TOKEN_SYMBOL_LENGTH {
        return Err(AssetError::InvalidTokenSymbol(format!(
            "token symbol length should be in (0, {}]",
            MAX_TOKEN_SYMBOL_LENGTH
        )));
    }

    validate_symbol_content(symbol)
}

/// Reserved native names (case-insensitive), then lowercase ASCII letters
/// only. Length is the caller's concern.
fn validate_symbol_content(symbol: &str) -> Result<(), AssetError> {
    let lowered = symbol.to_ascii_lowercase();
    if lowered == NATIVE_DENOM || lowered == NATIVE_DENOM_NAME {
        return Err(AssetError::InvalidTokenSymbol(format!(
            "token symbol should not be identical to native token {}/{}",
            NATIVE_DENOM, NATIVE_DENOM_NAME
        )));
    }

    if !symbol.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(AssetError::InvalidTokenSymbol(
            "token symbol should only contain lower case alphabet".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), AssetError> {
    if name.is_empty() || name.len() > MAX_TOKEN_NAME_LENGTH {
        return Err(AssetError::InvalidTokenName(format!(
            "token name length should be in (0, {}]",
            MAX_TOKEN_NAME_LENGTH
        )));
    }
    if name == NATIVE_DENOM || name == NATIVE_DENOM_NAME {
        return Err(AssetError::InvalidTokenName(format!(
            "token name should not be identical to native token {}/{}",
            NATIVE_DENOM, NATIVE_DENOM_NAME
        )));
    }
    Ok(())
}

/// Description cap for the regime active at the gate's height.
pub fn description_limit(gate: &dyn HeightGate) -> usize {
    if gate.is_upgrade_applied(UpgradeName::TokenDesLenLimit) {
        NEW_MAX_TOKEN_DES_LENGTH
    } else {
        MAX_TOKEN_DES_LENGTH
    }
}

pub fn validate_description(description: &str, gate: &dyn HeightGate) -> Result<(), AssetError> {
    let limit = description_limit(gate);
    if description.len() > limit {
        return Err(AssetError::InvalidTokenDescription(format!(
            "token description length {} should not exceed {}",
            description.len(),
            limit
        )));
    }
    Ok(())
}

/// `[0, MAX_TOTAL_SUPPLY]`: issuing a zero-supply token is allowed.
pub fn validate_total_supply(total_supply: i64) -> Result<(), AssetError> {
    if !(0..=MAX_TOTAL_SUPPLY).contains(&total_supply) {
        return Err(AssetError::InvalidTotalSupply(format!(
            "total supply should be in [0, {}]",
            MAX_TOTAL_SUPPLY
        )));
    }
    Ok(())
}

pub fn validate_decimal(decimal: i8) -> Result<(), AssetError> {
    if decimal < 0 {
        return Err(AssetError::InvalidDecimal(format!(
            "token decimal {} is negative",
            decimal
        )));
    }
    Ok(())
}

/// Full check of a stored token, as applied to genesis documents. Accepts
/// anything either regime could have issued: symbol length `(0, 12]`,
/// description up to the larger cap, supply in `[0, MAX_TOTAL_SUPPLY]`.
pub fn validate_token(token: &Token) -> Result<(), AssetError> {
    validate_name(&token.name)?;
    if token.description.len() > NEW_MAX_TOKEN_DES_LENGTH {
        return Err(AssetError::InvalidTokenDescription(format!(
            "token description length {} should not exceed {}",
            token.description.len(),
            NEW_MAX_TOKEN_DES_LENGTH
        )));
    }
    if token.symbol.is_empty() || token.symbol.len() > MAX_TOKEN_SYMBOL_LENGTH {
        return Err(AssetError::InvalidTokenSymbol(format!(
            "token symbol length should be in (0, {}]",
            MAX_TOKEN_SYMBOL_LENGTH
        )));
    }
    validate_symbol_content(&token.symbol)?;
    validate_decimal(token.decimal)?;
    validate_total_supply(token.total_supply)
}
