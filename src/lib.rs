//! Order Utils
//!
//! Typed structured-data hashing for 0x protocol order signing.
//!
//! # Architecture
//!
//! This crate provides:
//! - **eip712**: schema compilation, domain separator derivation and
//!   signable message assembly
//! - **utils**: keccak-256, checksum addresses and structured logging
//! - **error**: the error taxonomy shared by every operation
//!
//! Every operation is a pure function of its inputs and safe to call from
//! any number of threads. Signing and verification are left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use order_utils::{create_signable_message, get_domain_separator_hash};
//!
//! let domain = get_domain_separator_hash("0x12459C951127e0c374FF9105DdA097662A027093")?;
//! let digest = create_signable_message(&struct_hash, exchange_address)?;
//! ```

pub mod error;
pub mod eip712;
pub mod utils;

// Re-export key types for convenience
pub use error::{Eip712Error, Eip712Result, ErrorCode};

pub use eip712::{
    compile_schema,
    create_signable_message,
    create_signable_message_hex,
    domain_schema,
    domain_separator_schema_hash,
    encode_packed,
    encode_value,
    get_domain_separator_hash,
    get_domain_separator_hash_hex,
    get_pre_image,
    hash,
    hash_struct,
    pad32_address,
    pad32_buffer,
    pad_left,
    Address,
    Digest,
    Eip712Domain,
    Eip712PreImage,
    Eip712Schema,
    EncodableValue,
    TypedParameter,
};

pub use utils::crypto::{keccak256, to_checksum_address};
