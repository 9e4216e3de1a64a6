//! # Core Domain Entities
//!
//! Accounts and value as every ledger module sees them.
//!
//! ## Clusters
//!
//! - **Chain**: `BlockHeight`, the never-activating height sentinel
//! - **Accounts**: `Address`, module account derivation
//! - **Value**: `Coin`, `Coins` (sorted multiset of denom/amount pairs)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use sha2::{Digest, Sha256};
use thiserror::Error;

// =============================================================================
// CLUSTER A: THE CHAIN
// =============================================================================

/// Height of a block in the externally agreed transaction order.
pub type BlockHeight = u64;

/// Activation height meaning "this upgrade never activates".
pub const HEIGHT_NEVER: BlockHeight = u64::MAX;

/// Denomination of the chain's native bonding token (micro units).
pub const NATIVE_DENOM: &str = "ubarkis";

/// Display name of the chain's native bonding token.
pub const NATIVE_DENOM_NAME: &str = "barkis";

/// Module account that accumulates operation fees.
pub const FEE_COLLECTOR_NAME: &str = "fee_collector";

// =============================================================================
// CLUSTER B: ACCOUNTS
// =============================================================================

/// Length in bytes of every account address.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account address, hex-encoded at the serialization boundary.
#[serde_as]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Address(#[serde_as(as = "Hex")] pub [u8; ADDRESS_LEN]);

impl Address {
    /// Derives an address as the first 20 bytes of `SHA-256(data)`.
    pub fn hash_of(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes.copy_from_slice(&digest[..ADDRESS_LEN]);
        Self(bytes)
    }

    /// Address of the module account called `name`.
    pub fn for_module(name: &str) -> Self {
        Self::hash_of(name.as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Errors produced when parsing an address from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is not valid hex: {0}")]
    InvalidHex(String),

    #[error("address length should be {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        let bytes: [u8; ADDRESS_LEN] =
            raw.as_slice()
                .try_into()
                .map_err(|_| AddressError::InvalidLength {
                    expected: ADDRESS_LEN,
                    actual: raw.len(),
                })?;
        Ok(Self(bytes))
    }
}

// =============================================================================
// CLUSTER C: VALUE
// =============================================================================

/// Errors produced when building or combining coins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoinsError {
    #[error("invalid denom: {0}")]
    InvalidDenom(String),

    #[error("duplicate denom: {0}")]
    DuplicateDenom(String),

    #[error("coin amount overflow for denom {0}")]
    Overflow(String),
}

/// A single denomination and amount.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Denoms start with a lowercase letter followed by 2 to 15 lowercase
    /// letters or digits.
    pub fn is_valid_denom(denom: &str) -> bool {
        let bytes = denom.as_bytes();
        (3..=16).contains(&bytes.len())
            && bytes[0].is_ascii_lowercase()
            && bytes[1..]
                .iter()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins sorted by denom, with no duplicate denoms and no zero amounts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Builds a sanitized coin set: zero amounts dropped, sorted by denom.
    pub fn new(coins: Vec<Coin>) -> Result<Self, CoinsError> {
        let mut coins: Vec<Coin> = coins.into_iter().filter(|c| c.amount > 0).collect();
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        for coin in &coins {
            if !Coin::is_valid_denom(&coin.denom) {
                return Err(CoinsError::InvalidDenom(coin.denom.clone()));
            }
        }
        for pair in coins.windows(2) {
            if pair[0].denom == pair[1].denom {
                return Err(CoinsError::DuplicateDenom(pair[0].denom.clone()));
            }
        }
        Ok(Self(coins))
    }

    /// A coin set holding one denomination.
    pub fn single(denom: impl Into<String>, amount: u128) -> Result<Self, CoinsError> {
        Self::new(vec![Coin::new(denom, amount)])
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    /// True if the set is sorted, duplicate-free, and every denom is valid.
    pub fn is_valid(&self) -> bool {
        self.0.iter().all(|c| Coin::is_valid_denom(&c.denom))
            && self.0.windows(2).all(|w| w[0].denom < w[1].denom)
    }

    /// True if the set is non-empty and every amount is positive.
    pub fn is_all_positive(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|c| c.amount > 0)
    }

    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    /// `self + other`, failing on overflow.
    pub fn checked_add(&self, other: &Coins) -> Result<Coins, CoinsError> {
        let mut merged = self.0.clone();
        for coin in &other.0 {
            match merged.iter_mut().find(|c| c.denom == coin.denom) {
                Some(existing) => {
                    existing.amount = existing
                        .amount
                        .checked_add(coin.amount)
                        .ok_or_else(|| CoinsError::Overflow(coin.denom.clone()))?;
                }
                None => merged.push(coin.clone()),
            }
        }
        Coins::new(merged)
    }

    /// `self - other`, or `None` if any resulting amount would be negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut remaining = self.0.clone();
        for coin in &other.0 {
            let existing = remaining.iter_mut().find(|c| c.denom == coin.denom);
            match existing {
                Some(c) if c.amount >= coin.amount => c.amount -= coin.amount,
                _ => return None,
            }
        }
        Coins::new(remaining).ok()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
