//! Issue and Mint messages with their stateless validation.

use bk_01_upgrade_registry::HeightGate;
use serde::{Deserialize, Serialize};
use shared_types::{Address, MsgType};

use super::errors::AssetError;
use super::keys::MAX_TOTAL_SUPPLY;
use super::validation::{
    validate_decimal, validate_description, validate_name, validate_symbol, validate_total_supply,
};

/// Creates a new token owned by `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueMsg {
    pub from: Address,
    pub name: String,
    pub symbol: String,
    pub total_supply: i64,
    pub mintable: bool,
    pub decimal: i8,
    pub description: String,
}

impl IssueMsg {
    pub fn new(
        from: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        total_supply: i64,
        mintable: bool,
        decimal: i8,
        description: impl Into<String>,
    ) -> Self {
        Self {
            from,
            name: name.into(),
            symbol: symbol.into(),
            total_supply,
            mintable,
            decimal,
            description: description.into(),
        }
    }

    /// Symbol as it will be stored.
    pub fn stored_symbol(&self) -> String {
        self.symbol.to_ascii_lowercase()
    }

    /// Checks that need no state. The symbol is validated in its stored
    /// (lowercase) form, so `"BTC"` passes and is issued as `"btc"`.
    pub fn validate_basic(&self, gate: &dyn HeightGate) -> Result<(), AssetError> {
        validate_name(&self.name)?;
        validate_symbol(&self.stored_symbol(), gate)?;
        validate_total_supply(self.total_supply)?;
        validate_decimal(self.decimal)?;
        validate_description(&self.description, gate)
    }
}

/// Adds `amount` units to an existing mintable token. Only its owner may.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintMsg {
    pub from: Address,
    pub symbol: String,
    pub amount: i64,
}

impl MintMsg {
    pub fn new(from: Address, symbol: impl Into<String>, amount: i64) -> Self {
        Self {
            from,
            symbol: symbol.into(),
            amount,
        }
    }

    /// The symbol is checked exactly as given; mint never lowercases.
    pub fn validate_basic(&self, gate: &dyn HeightGate) -> Result<(), AssetError> {
        validate_symbol(&self.symbol, gate)?;
        if self.amount <= 0 || self.amount > MAX_TOTAL_SUPPLY {
            return Err(AssetError::InvalidMintAmount(format!(
                "mint amount should be in (0, {}]",
                MAX_TOTAL_SUPPLY
            )));
        }
        Ok(())
    }
}

/// Every message routed to the asset module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum AssetMsg {
    #[serde(rename = "asset/IssueMsg")]
    Issue(IssueMsg),
    #[serde(rename = "asset/MintMsg")]
    Mint(MintMsg),
}

impl AssetMsg {
    pub fn msg_type(&self) -> MsgType {
        match self {
            Self::Issue(_) => MsgType::Issue,
            Self::Mint(_) => MsgType::Mint,
        }
    }

    pub fn signer(&self) -> Address {
        match self {
            Self::Issue(msg) => msg.from,
            Self::Mint(msg) => msg.from,
        }
    }

    pub fn validate_basic(&self, gate: &dyn HeightGate) -> Result<(), AssetError> {
        match self {
            Self::Issue(msg) => msg.validate_basic(gate),
            Self::Mint(msg) => msg.validate_basic(gate),
        }
    }
}

impl From<IssueMsg> for AssetMsg {
    fn from(msg: IssueMsg) -> Self {
        Self::Issue(msg)
    }
}

impl From<MintMsg> for AssetMsg {
    fn from(msg: MintMsg) -> Self {
        Self::Mint(msg)
    }
}
