//! Genesis import/export for the asset module.

use serde::{Deserialize, Serialize};
use shared_types::Context;
use thiserror::Error;
use tracing::info;

use crate::domain::errors::AssetError;
use crate::domain::params::{Params, ParamsError};
use crate::domain::token::Token;
use crate::domain::validation::validate_token;
use crate::keeper::AssetKeeper;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    #[error("invalid genesis token {symbol}: {source}")]
    InvalidToken {
        symbol: String,
        #[source]
        source: AssetError,
    },

    #[error("duplicated genesis token {0}")]
    DuplicateToken(String),

    #[error("invalid asset params: {0}")]
    InvalidParams(#[from] ParamsError),
}

/// Asset state carried in the genesis document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    #[serde(default)]
    pub tokens: Vec<Token>,
}

impl Default for GenesisState {
    fn default() -> Self {
        Self {
            params: Params::default(),
            tokens: Vec::new(),
        }
    }
}

/// Checks every token, then the params. Stops at the first violation. Tokens
/// may come from an export, so either validation regime is accepted.
pub fn validate_genesis(data: &GenesisState) -> Result<(), GenesisError> {
    let mut seen = std::collections::BTreeSet::new();
    for token in &data.tokens {
        validate_token(token).map_err(|source| GenesisError::InvalidToken {
            symbol: token.symbol.clone(),
            source,
        })?;
        if !seen.insert(token.symbol.as_str()) {
            return Err(GenesisError::DuplicateToken(token.symbol.clone()));
        }
    }
    data.params.validate()?;
    Ok(())
}

/// Persists every token, then the params. Expects a validated document.
pub fn init_genesis(ctx: &mut Context<'_>, keeper: &AssetKeeper, data: &GenesisState) {
    for token in &data.tokens {
        keeper.set_token(ctx, token);
    }
    keeper.set_params(ctx, &data.params);
    info!(tokens = data.tokens.len(), "Asset genesis loaded");
}

/// Current params plus every token in symbol order.
pub fn export_genesis(ctx: &Context<'_>, keeper: &AssetKeeper) -> GenesisState {
    GenesisState {
        params: keeper.get_params(ctx),
        tokens: keeper.list_tokens(ctx).collect(),
    }
}
