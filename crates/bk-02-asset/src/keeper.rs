//! # Asset Keeper
//!
//! Owns the token records in the `Asset` store and the module parameters in
//! the `asset` parameter subspace.
//!
//! ## Invariants
//!
//! - Tokens live under `[0x01] || symbol`, so a prefix scan over `[0x01]`
//!   yields every token in symbol byte order.
//! - `set_token` only creates and `update_token` only overwrites. Calling
//!   either the other way round is a bug in an already-validated path and
//!   panics.

use std::sync::Arc;

use shared_types::{Coins, Context, KvRead, KvStore, StoreName, Subspace};

use crate::domain::keys::{token_key, MODULE_NAME, TOKEN_KEY_PREFIX};
use crate::domain::params::{
    param_key_table, Params, PARAM_KEY_ISSUE_FEE, PARAM_KEY_MAX_DECIMAL, PARAM_KEY_MINT_FEE,
};
use crate::domain::token::Token;
use crate::ports::SupplyKeeper;

fn decode_entry((_, raw): (Vec<u8>, Vec<u8>)) -> Token {
    Token::decode(&raw)
}

#[derive(Clone)]
pub struct AssetKeeper {
    param_space: Subspace,
    supply: Arc<dyn SupplyKeeper>,
}

impl AssetKeeper {
    pub fn new(supply: Arc<dyn SupplyKeeper>) -> Self {
        Self {
            param_space: Subspace::new(MODULE_NAME).with_key_table(param_key_table()),
            supply,
        }
    }

    /// The supply collaborator used for fee and mint movements.
    pub fn supply(&self) -> &dyn SupplyKeeper {
        self.supply.as_ref()
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    pub fn set_token(&self, ctx: &mut Context<'_>, token: &Token) {
        let key = token_key(&token.symbol);
        let mut store = ctx.kv_store_mut(StoreName::Asset);
        if store.has(&key) {
            panic!("duplicated token symbol {}", token.symbol);
        }
        store.set(&key, token.encode());
    }

    pub fn update_token(&self, ctx: &mut Context<'_>, token: &Token) {
        let key = token_key(&token.symbol);
        let mut store = ctx.kv_store_mut(StoreName::Asset);
        if !store.has(&key) {
            panic!("non-existent token {}", token.symbol);
        }
        store.set(&key, token.encode());
    }

    /// Looks `symbol` up exactly as given; no case folding.
    pub fn get_token(&self, ctx: &Context<'_>, symbol: &str) -> Option<Token> {
        ctx.kv_store(StoreName::Asset)
            .get(&token_key(symbol))
            .map(|raw| Token::decode(&raw))
    }

    pub fn is_token_exist(&self, ctx: &Context<'_>, symbol: &str) -> bool {
        ctx.kv_store(StoreName::Asset).has(&token_key(symbol))
    }

    /// Every token in symbol byte order, decoded lazily. Calling again
    /// restarts from the first token.
    pub fn list_tokens<'c>(&self, ctx: &'c Context<'_>) -> impl Iterator<Item = Token> + 'c {
        ctx.kv_store(StoreName::Asset)
            .into_prefix_iter(TOKEN_KEY_PREFIX)
            .map(decode_entry)
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    pub fn get_max_decimal(&self, ctx: &Context<'_>) -> i8 {
        self.param_space.get(ctx, PARAM_KEY_MAX_DECIMAL)
    }

    pub fn set_max_decimal(&self, ctx: &mut Context<'_>, max_decimal: i8) {
        self.param_space.set(ctx, PARAM_KEY_MAX_DECIMAL, &max_decimal);
    }

    pub fn get_issue_fee(&self, ctx: &Context<'_>) -> Coins {
        self.param_space.get(ctx, PARAM_KEY_ISSUE_FEE)
    }

    pub fn set_issue_fee(&self, ctx: &mut Context<'_>, fee: &Coins) {
        self.param_space.set(ctx, PARAM_KEY_ISSUE_FEE, fee);
    }

    pub fn get_mint_fee(&self, ctx: &Context<'_>) -> Coins {
        self.param_space.get(ctx, PARAM_KEY_MINT_FEE)
    }

    pub fn set_mint_fee(&self, ctx: &mut Context<'_>, fee: &Coins) {
        self.param_space.set(ctx, PARAM_KEY_MINT_FEE, fee);
    }

    pub fn get_params(&self, ctx: &Context<'_>) -> Params {
        Params::new(
            self.get_max_decimal(ctx),
            self.get_issue_fee(ctx),
            self.get_mint_fee(ctx),
        )
    }

    pub fn set_params(&self, ctx: &mut Context<'_>, params: &Params) {
        self.set_max_decimal(ctx, params.max_decimal);
        self.set_issue_fee(ctx, &params.issue_fee);
        self.set_mint_fee(ctx, &params.mint_fee);
    }
}
