//! Application genesis document.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use bk_02_asset::{validate_genesis, AccountBalance, GenesisError, GenesisState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Genesis document errors.
#[derive(Debug, Error)]
pub enum AppGenesisError {
    #[error("Failed to read genesis file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse genesis document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Genesis chain id {found:?} does not match node chain id {expected:?}")]
    ChainIdMismatch { expected: String, found: String },

    #[error("Invalid genesis balance for {address}: {reason}")]
    InvalidBalance { address: String, reason: String },

    #[error("Duplicated genesis account {0}")]
    DuplicateAccount(String),

    #[error(transparent)]
    Asset(#[from] GenesisError),
}

/// Initial state of the whole application.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppGenesis {
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub balances: Vec<AccountBalance>,
    #[serde(default)]
    pub asset: GenesisState,
}

impl AppGenesis {
    pub fn from_json(raw: &str) -> Result<Self, AppGenesisError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, AppGenesisError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, AppGenesisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks balances, then the asset section. An empty chain id matches
    /// any node.
    pub fn validate(&self, chain_id: &str) -> Result<(), AppGenesisError> {
        if !self.chain_id.is_empty() && self.chain_id != chain_id {
            return Err(AppGenesisError::ChainIdMismatch {
                expected: chain_id.to_string(),
                found: self.chain_id.clone(),
            });
        }

        let mut seen = BTreeSet::new();
        for balance in &self.balances {
            if !seen.insert(balance.address) {
                return Err(AppGenesisError::DuplicateAccount(balance.address.to_string()));
            }
            if !balance.coins.is_valid() || !balance.coins.is_all_positive() {
                return Err(AppGenesisError::InvalidBalance {
                    address: balance.address.to_string(),
                    reason: format!("coins {:?} must be valid and positive", balance.coins),
                });
            }
        }

        validate_genesis(&self.asset)?;
        Ok(())
    }
}
