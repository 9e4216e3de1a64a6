//! # Error Types
//!
//! Every user-facing domain error carries a stable `(codespace, code)` pair so
//! that replicas and clients agree on the outcome of a rejected operation.
//! Programmer errors (wiring mistakes, corrupted storage) are not modelled
//! here; they panic at the point of detection.

use thiserror::Error;

/// Numeric result code. `0` is reserved for success.
pub type ErrorCode = u32;

/// Codespace of the base errors below.
pub const SDK_CODESPACE: &str = "sdk";

pub const CODE_OK: ErrorCode = 0;
pub const CODE_INTERNAL: ErrorCode = 1;
pub const CODE_UNKNOWN_REQUEST: ErrorCode = 6;
pub const CODE_INVALID_ADDRESS: ErrorCode = 7;
pub const CODE_INSUFFICIENT_COINS: ErrorCode = 10;
pub const CODE_INVALID_COINS: ErrorCode = 11;

/// An error with a stable numeric code, namespaced by codespace.
pub trait CodedError: std::error::Error {
    fn codespace(&self) -> &'static str;
    fn code(&self) -> ErrorCode;
}

/// Base errors shared by all modules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    #[error("internal: {0}")]
    Internal(String),

    #[error("unknown request: {0}")]
    UnknownRequest(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("insufficient coins: {0}")]
    InsufficientCoins(String),

    #[error("invalid coins: {0}")]
    InvalidCoins(String),
}

impl CodedError for SdkError {
    fn codespace(&self) -> &'static str {
        SDK_CODESPACE
    }

    fn code(&self) -> ErrorCode {
        match self {
            Self::Internal(_) => CODE_INTERNAL,
            Self::UnknownRequest(_) => CODE_UNKNOWN_REQUEST,
            Self::InvalidAddress(_) => CODE_INVALID_ADDRESS,
            Self::InsufficientCoins(_) => CODE_INSUFFICIENT_COINS,
            Self::InvalidCoins(_) => CODE_INVALID_COINS,
        }
    }
}
