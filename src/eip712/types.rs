//! EIP-712 Type Definitions
//!
//! Core data structures for schema compilation and hashing.

use crate::error::{Eip712Error, Eip712Result};
use crate::utils::crypto::to_checksum_address;
use num_bigint::{BigInt, BigUint, Sign};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fixed 32-byte keccak-256 output
pub type Digest = [u8; 32];

/// Width of every EIP-712 word
pub const EIP712_VALUE_LENGTH: usize = 32;

/// Length of a raw address
pub const ADDRESS_LENGTH: usize = 20;

/// Magic prefix placed before the domain separator and struct hash
pub const EIP191_PREFIX: &[u8; 2] = b"\x19\x01";

/// Protocol name hashed into every domain separator
pub const EIP712_DOMAIN_NAME: &str = "0x Protocol";

/// Protocol version hashed into every domain separator
pub const EIP712_DOMAIN_VERSION: &str = "1";

/// Name of the fixed domain schema
pub const EIP712_DOMAIN_SCHEMA_NAME: &str = "DomainSeparator";

/// A single field in a schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TypedParameter {
    /// The name of the field
    pub name: String,
    /// The type of the field (e.g., "address", "uint256", or a struct name).
    /// Taken verbatim; never validated here.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl TypedParameter {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A named, ordered list of typed fields
///
/// Parameter order is part of the signature string, so it is kept
/// exactly as declared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Eip712Schema {
    pub name: String,
    pub parameters: Vec<TypedParameter>,
}

impl Eip712Schema {
    pub fn new(name: impl Into<String>, parameters: Vec<TypedParameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// Parse a schema from JSON
    pub fn from_json(json: &str) -> Eip712Result<Self> {
        serde_json::from_str(json).map_err(|e| Eip712Error::InvalidJson(e.to_string()))
    }

    /// Canonical signature string
    /// Format: "Name(type1 name1,type2 name2,...)"
    pub fn signature(&self) -> String {
        let field_strs: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.type_name, p.name))
            .collect();

        format!("{}({})", self.name, field_strs.join(","))
    }
}

/// A raw 20-byte address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Address(pub [u8; ADDRESS_LENGTH]);

impl Address {
    pub const ZERO: Address = Address([0u8; ADDRESS_LENGTH]);

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = Eip712Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if hex_part.len() != ADDRESS_LENGTH * 2 {
            return Err(Eip712Error::InvalidAddress(format!(
                "invalid length: expected {} hex chars, got {}",
                ADDRESS_LENGTH * 2,
                hex_part.len()
            )));
        }

        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(hex_part, &mut bytes)
            .map_err(|e| Eip712Error::InvalidAddress(format!("invalid hex: {}", e)))?;

        Ok(Address(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_checksum_address(&self.0))
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(bytes)
    }
}

/// An input to the hash primitive
///
/// Each kind has exactly one canonical byte encoding (see
/// [`encode_value`](super::encoder::encode_value)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodableValue {
    /// Used verbatim
    Bytes(Vec<u8>),
    /// Big-endian, left-padded to a 32-byte word
    Number(BigInt),
    /// Raw UTF-8 bytes
    Text(String),
}

impl EncodableValue {
    /// A 32-byte value read as a big-endian unsigned word
    pub fn word(bytes: &[u8; 32]) -> Self {
        EncodableValue::Number(BigInt::from_bytes_be(Sign::Plus, bytes))
    }
}

impl From<&str> for EncodableValue {
    fn from(s: &str) -> Self {
        EncodableValue::Text(s.to_string())
    }
}

impl From<String> for EncodableValue {
    fn from(s: String) -> Self {
        EncodableValue::Text(s)
    }
}

impl From<Vec<u8>> for EncodableValue {
    fn from(bytes: Vec<u8>) -> Self {
        EncodableValue::Bytes(bytes)
    }
}

impl From<&[u8]> for EncodableValue {
    fn from(bytes: &[u8]) -> Self {
        EncodableValue::Bytes(bytes.to_vec())
    }
}

impl From<[u8; 32]> for EncodableValue {
    fn from(bytes: [u8; 32]) -> Self {
        EncodableValue::Bytes(bytes.to_vec())
    }
}

impl From<Address> for EncodableValue {
    fn from(address: Address) -> Self {
        EncodableValue::Bytes(address.0.to_vec())
    }
}

impl From<u64> for EncodableValue {
    fn from(n: u64) -> Self {
        EncodableValue::Number(BigInt::from(n))
    }
}

impl From<i64> for EncodableValue {
    fn from(n: i64) -> Self {
        EncodableValue::Number(BigInt::from(n))
    }
}

impl From<BigInt> for EncodableValue {
    fn from(n: BigInt) -> Self {
        EncodableValue::Number(n)
    }
}

impl From<BigUint> for EncodableValue {
    fn from(n: BigUint) -> Self {
        EncodableValue::Number(BigInt::from(n))
    }
}
