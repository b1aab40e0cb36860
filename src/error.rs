//! Unified error types for order-utils
//!
//! Every hashing operation either yields a complete digest or one of
//! these errors. There is no partial result.

use serde::{Deserialize, Serialize};

/// Errors that can occur while encoding or hashing EIP-712 data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Eip712Error {
    #[error("Oversized input: {len} bytes exceeds pad width of {width}")]
    OversizedInput { len: usize, width: usize },

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Schema {schema} expects {expected} values, got {actual}")]
    ArityMismatch {
        schema: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl Eip712Error {
    /// Stable category for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Eip712Error::OversizedInput { .. } => ErrorCode::OversizedInput,
            Eip712Error::Encoding(_) => ErrorCode::EncodingError,
            Eip712Error::InvalidAddress(_) => ErrorCode::InvalidAddress,
            Eip712Error::ArityMismatch { .. } => ErrorCode::ArityMismatch,
            Eip712Error::InvalidJson(_) => ErrorCode::InvalidJson,
        }
    }
}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    OversizedInput,
    EncodingError,
    InvalidAddress,
    ArityMismatch,
    InvalidJson,
}

/// Result type alias for order-utils operations
pub type Eip712Result<T> = Result<T, Eip712Error>;
