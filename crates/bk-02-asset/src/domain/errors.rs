//! Error types for the asset module
//!
//! Every variant maps to a stable code in the `asset` codespace. Errors from
//! the supply collaborator pass through with their own code.

use shared_types::{Address, CodedError, ErrorCode, SdkError};
use thiserror::Error;

pub const ASSET_CODESPACE: &str = "asset";

pub const CODE_INVALID_TOKEN_NAME: ErrorCode = 101;
pub const CODE_INVALID_TOKEN_SYMBOL: ErrorCode = 102;
pub const CODE_INVALID_TOTAL_SUPPLY: ErrorCode = 103;
pub const CODE_INVALID_DECIMAL: ErrorCode = 104;
pub const CODE_INVALID_MINT_AMOUNT: ErrorCode = 105;
pub const CODE_INVALID_TOKEN_DESCRIPTION: ErrorCode = 106;
pub const CODE_NOT_MINTABLE_TOKEN: ErrorCode = 107;
pub const CODE_UNAUTHORIZED_MINT: ErrorCode = 108;

/// All user-facing failures of issue and mint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("invalid token name: {0}")]
    InvalidTokenName(String),

    #[error("invalid token symbol: {0}")]
    InvalidTokenSymbol(String),

    #[error("duplicated token symbol: {0}")]
    DuplicateSymbol(String),

    #[error("token {0} is not exist")]
    UnknownToken(String),

    #[error("invalid total supply: {0}")]
    InvalidTotalSupply(String),

    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),

    #[error("invalid mint amount: {0}")]
    InvalidMintAmount(String),

    #[error("invalid token description: {0}")]
    InvalidTokenDescription(String),

    #[error("token {0} is not mintable")]
    NotMintable(String),

    #[error("only {owner} is authorized to mint token {symbol}")]
    UnauthorizedMint { owner: Address, symbol: String },

    /// Failure reported by the supply collaborator.
    #[error(transparent)]
    Supply(#[from] SdkError),
}

impl CodedError for AssetError {
    fn codespace(&self) -> &'static str {
        match self {
            Self::Supply(inner) => inner.codespace(),
            _ => ASSET_CODESPACE,
        }
    }

    fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidTokenName(_) => CODE_INVALID_TOKEN_NAME,
            Self::InvalidTokenSymbol(_) | Self::DuplicateSymbol(_) | Self::UnknownToken(_) => {
                CODE_INVALID_TOKEN_SYMBOL
            }
            Self::InvalidTotalSupply(_) => CODE_INVALID_TOTAL_SUPPLY,
            Self::InvalidDecimal(_) => CODE_INVALID_DECIMAL,
            Self::InvalidMintAmount(_) => CODE_INVALID_MINT_AMOUNT,
            Self::InvalidTokenDescription(_) => CODE_INVALID_TOKEN_DESCRIPTION,
            Self::NotMintable(_) => CODE_NOT_MINTABLE_TOKEN,
            Self::UnauthorizedMint { .. } => CODE_UNAUTHORIZED_MINT,
            Self::Supply(inner) => inner.code(),
        }
    }
}
