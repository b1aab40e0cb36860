//! EIP-712 Encoding
//!
//! Padding, canonical value encoding, the packed hash primitive and the
//! schema compiler.

use super::types::*;
use crate::error::{Eip712Error, Eip712Result};
use crate::utils::crypto::keccak256;
use num_bigint::Sign;

/// Left-pad `bytes` with zeros to exactly `width` bytes
///
/// Inputs longer than `width` are rejected, never truncated.
pub fn pad_left(bytes: &[u8], width: usize) -> Eip712Result<Vec<u8>> {
    if bytes.len() > width {
        return Err(Eip712Error::OversizedInput {
            len: bytes.len(),
            width,
        });
    }

    let mut padded = vec![0u8; width];
    padded[width - bytes.len()..].copy_from_slice(bytes);
    Ok(padded)
}

/// Left-pad `bytes` into a single 32-byte word
pub fn pad32_buffer(bytes: &[u8]) -> Eip712Result<[u8; 32]> {
    if bytes.len() > EIP712_VALUE_LENGTH {
        return Err(Eip712Error::OversizedInput {
            len: bytes.len(),
            width: EIP712_VALUE_LENGTH,
        });
    }

    let mut word = [0u8; EIP712_VALUE_LENGTH];
    word[EIP712_VALUE_LENGTH - bytes.len()..].copy_from_slice(bytes);
    Ok(word)
}

/// Parse an address string and right-align it in a 32-byte word
pub fn pad32_address(address: &str) -> Eip712Result<[u8; 32]> {
    let address: Address = address.parse()?;
    pad32_buffer(address.as_bytes())
}

/// Canonical byte encoding of a single value
pub fn encode_value(value: &EncodableValue) -> Eip712Result<Vec<u8>> {
    match value {
        EncodableValue::Bytes(bytes) => Ok(bytes.clone()),
        EncodableValue::Text(s) => Ok(s.as_bytes().to_vec()),
        EncodableValue::Number(n) => {
            let (sign, magnitude) = n.to_bytes_be();
            if sign == Sign::Minus {
                return Err(Eip712Error::Encoding(format!(
                    "negative integer has no unsigned word encoding: {}",
                    n
                )));
            }
            pad_left(&magnitude, EIP712_VALUE_LENGTH)
        }
    }
}

/// Concatenate the canonical encodings of `values`, in order, with no
/// delimiters or length prefixes
pub fn encode_packed(values: &[EncodableValue]) -> Eip712Result<Vec<u8>> {
    let mut encoded = Vec::new();
    for value in values {
        encoded.extend(encode_value(value)?);
    }
    Ok(encoded)
}

/// keccak256 over the packed encoding of `values`
pub fn hash(values: &[EncodableValue]) -> Eip712Result<Digest> {
    Ok(keccak256(&encode_packed(values)?))
}

/// Compile a schema to its type hash
///
/// typeHash = keccak256("Name(type1 name1,...)")
pub fn compile_schema(schema: &Eip712Schema) -> Digest {
    // A lone string is hashed as its raw UTF-8 bytes; this path cannot fail.
    keccak256(schema.signature().as_bytes())
}
