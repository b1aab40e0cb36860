//! EIP-712 Typed Data Hashing
//!
//! Schema compilation, domain separator derivation and signable message
//! assembly for the 0x protocol domain.
//!
//! # Reference
//! - <https://eips.ethereum.org/EIPS/eip-712>
//!
//! # Example
//! ```rust,ignore
//! use order_utils::eip712::{create_signable_message, hash_struct};
//!
//! let struct_hash = hash_struct(&order_schema, &values)?;
//! let digest = create_signable_message(&struct_hash, exchange_address)?;
//! ```

pub mod types;
pub mod encoder;
pub mod hasher;

pub use types::*;
pub use encoder::*;
pub use hasher::*;
