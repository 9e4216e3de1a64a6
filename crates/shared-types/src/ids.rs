//! # Typed Identifiers
//!
//! Closed sets of upgrade names, store namespaces and message kinds. String
//! forms exist only at the serialization boundary (`as_str` / serde renames).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named, height-activated behavioural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UpgradeName {
    /// Introduces the asset store and the issue/mint messages.
    #[serde(rename = "TokenIssueUpgrade")]
    TokenIssue,
    /// Lowers the issue and mint fees.
    #[serde(rename = "UpdateTokenSymbolRulesHeight")]
    UpdateTokenSymbolRules,
    /// Tightens symbol length to `[3, 12]` and raises the description cap.
    #[serde(rename = "TokenDesLenLimitUpgradeHeight")]
    TokenDesLenLimit,
}

impl UpgradeName {
    pub const ALL: [UpgradeName; 3] = [
        UpgradeName::TokenIssue,
        UpgradeName::UpdateTokenSymbolRules,
        UpgradeName::TokenDesLenLimit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TokenIssue => "TokenIssueUpgrade",
            Self::UpdateTokenSymbolRules => "UpdateTokenSymbolRulesHeight",
            Self::TokenDesLenLimit => "TokenDesLenLimitUpgradeHeight",
        }
    }
}

impl fmt::Display for UpgradeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A storage namespace inside the application's multi-store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreName {
    Params,
    Supply,
    Asset,
}

impl StoreName {
    /// Every store, in the fixed order used for app-hash computation.
    pub const ALL: [StoreName; 3] = [StoreName::Params, StoreName::Supply, StoreName::Asset];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Params => "params",
            Self::Supply => "supply",
            Self::Asset => "asset",
        }
    }

    /// Key prefix that isolates this store inside the root key-value store.
    pub fn key_prefix(&self) -> Vec<u8> {
        let mut prefix = self.as_str().as_bytes().to_vec();
        prefix.push(b'/');
        prefix
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction message kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MsgType {
    #[serde(rename = "issueMsg")]
    Issue,
    #[serde(rename = "mintMsg")]
    Mint,
}

impl MsgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issue => "issueMsg",
            Self::Mint => "mintMsg",
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
