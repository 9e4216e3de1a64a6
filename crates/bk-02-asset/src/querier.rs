//! # Asset Querier
//!
//! Read-only projection of keeper state, addressed by path:
//!
//! - `params` → current [`Params`](crate::Params)
//! - `get/<symbol>` → one token, or unknown-request if absent
//! - `list` with JSON body `{"page": n, "limit": m}` → one page of tokens
//!
//! Responses are pretty-printed JSON. Every endpoint is unavailable until
//! `TokenIssue` is applied.

use std::sync::Arc;

use bk_01_upgrade_registry::HeightGate;
use serde::{Deserialize, Serialize};
use shared_types::{Context, SdkError, UpgradeName};

use crate::domain::token::Token;
use crate::keeper::AssetKeeper;

pub const QUERY_PARAMS: &str = "params";
pub const QUERY_GET_TOKEN: &str = "get";
pub const QUERY_LIST_TOKEN: &str = "list";

/// Page size used when a list query passes `limit = 0`.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Body of a `list` query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTokensParams {
    #[serde(alias = "Page")]
    pub page: usize,
    #[serde(alias = "Limit")]
    pub limit: usize,
}

impl QueryTokensParams {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }
}

/// Window `[start, end)` of a 1-based `page` over `len` items, or `None` when
/// the page is empty. `page = 0` is always empty; `limit = 0` means
/// `default_limit`.
pub fn paginate(len: usize, page: usize, limit: usize, default_limit: usize) -> Option<(usize, usize)> {
    if page == 0 {
        return None;
    }
    let limit = if limit == 0 { default_limit } else { limit };
    let start = (page - 1).checked_mul(limit)?;
    if start >= len {
        return None;
    }
    let end = start.saturating_add(limit).min(len);
    Some((start, end))
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, SdkError> {
    serde_json::to_vec_pretty(value)
        .map_err(|e| SdkError::Internal(format!("could not marshal result to JSON: {e}")))
}

#[derive(Clone)]
pub struct AssetQuerier {
    keeper: AssetKeeper,
    gate: Arc<dyn HeightGate>,
}

impl AssetQuerier {
    pub fn new(keeper: AssetKeeper, gate: Arc<dyn HeightGate>) -> Self {
        Self { keeper, gate }
    }

    /// Dispatches `path` (already stripped of the module route) to an endpoint.
    pub fn query(&self, ctx: &Context<'_>, path: &[&str], data: &[u8]) -> Result<Vec<u8>, SdkError> {
        if !self.gate.is_upgrade_applied(UpgradeName::TokenIssue) {
            return Err(SdkError::UnknownRequest(format!(
                "asset related query is not supported until {}",
                UpgradeName::TokenIssue
            )));
        }
        match path.split_first() {
            Some((&QUERY_PARAMS, _)) => self.query_params(ctx),
            Some((&QUERY_GET_TOKEN, rest)) => self.query_token(ctx, rest),
            Some((&QUERY_LIST_TOKEN, _)) => self.list_tokens(ctx, data),
            _ => Err(SdkError::UnknownRequest(
                "unknown asset query endpoint".to_string(),
            )),
        }
    }

    fn query_params(&self, ctx: &Context<'_>) -> Result<Vec<u8>, SdkError> {
        to_pretty_json(&self.keeper.get_params(ctx))
    }

    fn query_token(&self, ctx: &Context<'_>, path: &[&str]) -> Result<Vec<u8>, SdkError> {
        let symbol = path
            .first()
            .ok_or_else(|| SdkError::UnknownRequest("wrong query request".to_string()))?;
        let token = self
            .keeper
            .get_token(ctx, symbol)
            .ok_or_else(|| SdkError::UnknownRequest(format!("token {symbol} is not exist")))?;
        to_pretty_json(&token)
    }

    fn list_tokens(&self, ctx: &Context<'_>, data: &[u8]) -> Result<Vec<u8>, SdkError> {
        let params: QueryTokensParams = serde_json::from_slice(data)
            .map_err(|e| SdkError::Internal(format!("failed to parse params: {e}")))?;

        let tokens: Vec<Token> = self.keeper.list_tokens(ctx).collect();
        let page: &[Token] =
            match paginate(tokens.len(), params.page, params.limit, DEFAULT_QUERY_LIMIT) {
                Some((start, end)) => &tokens[start..end],
                None => &[],
            };
        to_pretty_json(&page)
    }
}
