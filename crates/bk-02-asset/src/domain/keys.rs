//! Store layout and fixed limits of the asset module.

/// Module name: store key, router key, querier route, param subspace and
/// module account name.
pub const MODULE_NAME: &str = "asset";

/// Prefix of every token record in the asset store.
pub const TOKEN_KEY_PREFIX: &[u8] = &[0x01];

pub const MAX_TOKEN_NAME_LENGTH: usize = 32;
pub const MAX_TOKEN_SYMBOL_LENGTH: usize = 12;
/// Lower symbol bound once `TokenDesLenLimit` is applied.
pub const MIN_TOKEN_SYMBOL_LENGTH: usize = 3;
/// Description cap before `TokenDesLenLimit`.
pub const MAX_TOKEN_DES_LENGTH: usize = 128;
/// Description cap from `TokenDesLenLimit` on.
pub const NEW_MAX_TOKEN_DES_LENGTH: usize = 1024;
/// Upper bound of any token's total supply. Below `i64::MAX`.
pub const MAX_TOTAL_SUPPLY: i64 = 9_000_000_000_000_000_000;

/// `[0x01] || symbol`. Callers pass the stored (lowercase) form.
pub fn token_key(symbol: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(TOKEN_KEY_PREFIX.len() + symbol.len());
    key.extend_from_slice(TOKEN_KEY_PREFIX);
    key.extend_from_slice(symbol.as_bytes());
    key
}
