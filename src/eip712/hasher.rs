//! EIP-712 Hashing
//!
//! Domain separator derivation and final message assembly.

use super::encoder::{compile_schema, encode_value, hash, pad32_address, pad32_buffer};
use super::types::*;
use crate::error::{Eip712Error, Eip712Result};
use crate::utils::crypto::keccak256;
use crate::{log_debug, log_warn};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

lazy_static::lazy_static! {
    /// Compiled `DomainSeparator(...)` schema, computed on first use
    static ref DOMAIN_SCHEMA_HASH: Digest = compile_schema(&domain_schema());
}

/// The fixed domain schema
///
/// `DomainSeparator(string name,string version,address contract)`
pub fn domain_schema() -> Eip712Schema {
    Eip712Schema::new(
        EIP712_DOMAIN_SCHEMA_NAME,
        vec![
            TypedParameter::new("name", "string"),
            TypedParameter::new("version", "string"),
            TypedParameter::new("contract", "address"),
        ],
    )
}

/// Type hash of the domain schema
pub fn domain_separator_schema_hash() -> Digest {
    *DOMAIN_SCHEMA_HASH
}

/// Name and version bound into the domain separator
///
/// Only the verifying contract varies per call; the schema itself is
/// fixed whatever name and version are configured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Eip712Domain {
    /// The human-readable name of the signing domain
    pub name: String,
    /// The current major version of the signing domain
    pub version: String,
}

impl Default for Eip712Domain {
    fn default() -> Self {
        Self {
            name: EIP712_DOMAIN_NAME.to_string(),
            version: EIP712_DOMAIN_VERSION.to_string(),
        }
    }
}

impl Eip712Domain {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Load a domain from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Eip712Result<Self> {
        serde_json::from_str(json).map_err(|e| Eip712Error::InvalidJson(e.to_string()))
    }

    /// Calculate the domain separator hash
    ///
    /// keccak256(schemaHash || keccak256(name) || keccak256(version) || pad32(contract))
    pub fn separator_hash(&self, contract_address: &str) -> Eip712Result<Digest> {
        let padded_contract = pad32_address(contract_address).map_err(|e| {
            log_warn!("eip712", "rejected verifying contract", reason = e);
            e
        })?;

        let name_hash = keccak256(self.name.as_bytes());
        let version_hash = keccak256(self.version.as_bytes());

        let separator = hash(&[
            domain_separator_schema_hash().into(),
            name_hash.into(),
            version_hash.into(),
            padded_contract.into(),
        ])?;

        log_debug!(
            "eip712",
            "derived domain separator",
            name = self.name,
            version = self.version,
            contract = contract_address,
            separator = format!("0x{}", hex::encode(separator)),
        );

        Ok(separator)
    }

    /// Calculate the final hash for signing
    ///
    /// hash = keccak256("\x19\x01" || domainSeparator || structHash)
    pub fn signable_message(
        &self,
        struct_hash: &Digest,
        contract_address: &str,
    ) -> Eip712Result<Digest> {
        let domain_hash = self.separator_hash(contract_address)?;
        let message = assemble(&domain_hash, struct_hash)?;

        log_debug!(
            "eip712",
            "assembled signable message",
            struct_hash = format!("0x{}", hex::encode(struct_hash)),
            digest = format!("0x{}", hex::encode(message)),
        );

        Ok(message)
    }
}

/// Prefix, domain word and struct word: 2 + 32 + 32 bytes
fn assemble(domain_hash: &Digest, struct_hash: &Digest) -> Eip712Result<Digest> {
    hash(&[
        EncodableValue::Bytes(EIP191_PREFIX.to_vec()),
        EncodableValue::word(domain_hash),
        EncodableValue::word(struct_hash),
    ])
}

/// Domain separator for `contract_address` under the default domain
pub fn get_domain_separator_hash(contract_address: &str) -> Eip712Result<Digest> {
    Eip712Domain::default().separator_hash(contract_address)
}

/// Domain separator as a `0x`-prefixed lowercase hex string
pub fn get_domain_separator_hash_hex(contract_address: &str) -> Eip712Result<String> {
    let separator = get_domain_separator_hash(contract_address)?;
    Ok(format!("0x{}", hex::encode(separator)))
}

/// Merge a struct hash with the default domain separator
pub fn create_signable_message(
    struct_hash: &Digest,
    contract_address: &str,
) -> Eip712Result<Digest> {
    Eip712Domain::default().signable_message(struct_hash, contract_address)
}

/// Same as [`create_signable_message`], with the struct hash as hex
///
/// The hex value is read as a numeric word, so short values are
/// left-padded and odd digit counts are accepted.
pub fn create_signable_message_hex(
    struct_hash_hex: &str,
    contract_address: &str,
) -> Eip712Result<Digest> {
    let struct_hash = parse_word_hex(struct_hash_hex)?;
    create_signable_message(&struct_hash, contract_address)
}

/// Parse a hex string (with or without 0x prefix) as a 32-byte numeric word
///
/// Leading zero digits carry no value, so only the significant bytes
/// count against the word width.
fn parse_word_hex(s: &str) -> Eip712Result<Digest> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    if digits.is_empty() {
        return Err(Eip712Error::Encoding("empty hex word".to_string()));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(Eip712Error::Encoding(format!("invalid hex digit: {:?}", bad)));
    }

    let value = BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| Eip712Error::Encoding(format!("invalid hex word: {}", digits)))?;

    pad32_buffer(&encode_value(&EncodableValue::from(value))?)
}

/// Hash a flat struct
///
/// hashStruct(s) = keccak256(typeHash || packed(v1) || ... || packed(vn))
///
/// Each value is packed by its canonical encoding: strings and byte
/// sequences go in raw, not keccak'd as EIP-712 `encodeData` does. Callers
/// wanting `encodeData` semantics must pre-hash dynamic `string`/`bytes`
/// values and pass the digests. Only the number of values is checked
/// against the schema; the caller is responsible for their types.
pub fn hash_struct(schema: &Eip712Schema, values: &[EncodableValue]) -> Eip712Result<Digest> {
    if values.len() != schema.parameters.len() {
        return Err(Eip712Error::ArityMismatch {
            schema: schema.name.clone(),
            expected: schema.parameters.len(),
            actual: values.len(),
        });
    }

    let mut inputs = Vec::with_capacity(values.len() + 1);
    inputs.push(EncodableValue::from(compile_schema(schema)));
    inputs.extend_from_slice(values);
    hash(&inputs)
}

/// Pre-image components (for external signing)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eip712PreImage {
    pub domain_separator: Digest,
    pub struct_hash: Digest,
    pub final_hash: Digest,
}

/// Calculate the pre-image components under the default domain
pub fn get_pre_image(struct_hash: &Digest, contract_address: &str) -> Eip712Result<Eip712PreImage> {
    let domain_separator = get_domain_separator_hash(contract_address)?;
    let final_hash = assemble(&domain_separator, struct_hash)?;

    Ok(Eip712PreImage {
        domain_separator,
        struct_hash: *struct_hash,
        final_hash,
    })
}

#[cfg(test)]
mod hasher_tests {
    use super::*;

    const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
    const EXCHANGE: &str = "0x12459C951127e0c374FF9105DdA097662A027093";

    #[test]
    fn test_domain_schema_hash() {
        assert_eq!(
            hex::encode(domain_separator_schema_hash()),
            "3bfe6a8ac84b97b193f08907ee1a57604c8f5011bf2d09002cde90af7afc9357"
        );
        assert_eq!(domain_separator_schema_hash(), compile_schema(&domain_schema()));
    }

    #[test]
    fn test_domain_separator_zero_address() {
        let separator = get_domain_separator_hash(ZERO_ADDRESS).unwrap();
        assert_eq!(
            hex::encode(separator),
            "5871d22891b1eb2e0d3c06e85b8e8827fa8b2f93518a0e06bbcf68070051189d"
        );
    }

    #[test]
    fn test_domain_separator_exchange() {
        assert_eq!(
            get_domain_separator_hash_hex(EXCHANGE).unwrap(),
            "0x81705a3cc1a4a5866c2019b265e015455a3a98ac96f568da0500ad9c7611f06f"
        );
        // Address case does not matter
        assert_eq!(
            get_domain_separator_hash(EXCHANGE).unwrap(),
            get_domain_separator_hash(&EXCHANGE.to_lowercase()).unwrap()
        );
    }

    #[test]
    fn test_domain_separator_invalid_address() {
        assert!(matches!(
            get_domain_separator_hash("0x1234"),
            Err(Eip712Error::InvalidAddress(_))
        ));
        assert!(matches!(
            get_domain_separator_hash("not an address"),
            Err(Eip712Error::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_signable_message_zero_inputs() {
        let message = create_signable_message(&[0u8; 32], ZERO_ADDRESS).unwrap();
        assert_eq!(
            hex::encode(message),
            "fcae66b00a9896b3d6534b7e0bd7f760428877189cc3a56a802959de405c4bf1"
        );
    }

    #[test]
    fn test_signable_message_hex_matches_bytes() {
        let mut struct_hash = [0u8; 32];
        struct_hash[30] = 0x0a;
        struct_hash[31] = 0xbc;

        let from_bytes = create_signable_message(&struct_hash, EXCHANGE).unwrap();
        assert_eq!(
            create_signable_message_hex(&format!("0x{}", hex::encode(struct_hash)), EXCHANGE)
                .unwrap(),
            from_bytes
        );
        // Short and odd-length words are numeric
        assert_eq!(create_signable_message_hex("0xabc", EXCHANGE).unwrap(), from_bytes);
    }

    #[test]
    fn test_signable_message_hex_ignores_leading_zeros() {
        let struct_hash = [0x11u8; 32];
        let expected = create_signable_message(&struct_hash, ZERO_ADDRESS).unwrap();

        let padded_word = format!("0x00{}", "11".repeat(32));
        assert_eq!(
            create_signable_message_hex(&padded_word, ZERO_ADDRESS).unwrap(),
            expected
        );

        let many_zeros = format!("0x{}{}", "0".repeat(40), "11".repeat(32));
        assert_eq!(
            create_signable_message_hex(&many_zeros, ZERO_ADDRESS).unwrap(),
            expected
        );

        // All-zero words of any length are the zero word
        assert_eq!(
            create_signable_message_hex(&"0".repeat(70), ZERO_ADDRESS).unwrap(),
            create_signable_message(&[0u8; 32], ZERO_ADDRESS).unwrap()
        );
    }

    #[test]
    fn test_signable_message_hex_rejects_bad_words() {
        assert!(matches!(
            create_signable_message_hex("0x", EXCHANGE),
            Err(Eip712Error::Encoding(_))
        ));
        assert!(matches!(
            create_signable_message_hex("0xnothex", EXCHANGE),
            Err(Eip712Error::Encoding(_))
        ));
        assert!(matches!(
            create_signable_message_hex("0x1_000", EXCHANGE),
            Err(Eip712Error::Encoding(_))
        ));
        let too_long = format!("0x{}", "11".repeat(33));
        assert_eq!(
            create_signable_message_hex(&too_long, EXCHANGE),
            Err(Eip712Error::OversizedInput { len: 33, width: 32 })
        );
    }

    #[test]
    fn test_custom_domain() {
        let domain = Eip712Domain::from_json(r#"{"name": "Ether Mail"}"#).unwrap();
        assert_eq!(domain.version, EIP712_DOMAIN_VERSION);

        let expected = hash(&[
            domain_separator_schema_hash().into(),
            keccak256(b"Ether Mail").into(),
            keccak256(b"1").into(),
            pad32_address(EXCHANGE).unwrap().into(),
        ])
        .unwrap();
        assert_eq!(domain.separator_hash(EXCHANGE).unwrap(), expected);
        assert_ne!(expected, get_domain_separator_hash(EXCHANGE).unwrap());

        assert!(matches!(
            Eip712Domain::from_json("42"),
            Err(Eip712Error::InvalidJson(_))
        ));
    }

    #[test]
    fn test_hash_struct() {
        let schema = Eip712Schema::new(
            "Order",
            vec![
                TypedParameter::new("makerAddress", "address"),
                TypedParameter::new("salt", "uint256"),
            ],
        );
        let maker: Address = EXCHANGE.parse().unwrap();
        let values = [
            EncodableValue::from(pad32_buffer(maker.as_bytes()).unwrap()),
            EncodableValue::from(42u64),
        ];

        let mut preimage = compile_schema(&schema).to_vec();
        preimage.extend_from_slice(&pad32_buffer(maker.as_bytes()).unwrap());
        preimage.extend_from_slice(&pad32_buffer(&[42]).unwrap());

        assert_eq!(hash_struct(&schema, &values).unwrap(), keccak256(&preimage));
    }

    #[test]
    fn test_hash_struct_arity() {
        let schema = domain_schema();
        let err = hash_struct(&schema, &["0x Protocol".into()]).unwrap_err();
        assert_eq!(
            err,
            Eip712Error::ArityMismatch {
                schema: "DomainSeparator".to_string(),
                expected: 3,
                actual: 1,
            }
        );
    }

    #[test]
    fn test_get_pre_image() {
        let struct_hash = keccak256(b"struct");
        let pre_image = get_pre_image(&struct_hash, EXCHANGE).unwrap();

        assert_eq!(pre_image.struct_hash, struct_hash);
        assert_eq!(
            pre_image.domain_separator,
            get_domain_separator_hash(EXCHANGE).unwrap()
        );
        assert_eq!(
            pre_image.final_hash,
            create_signable_message(&struct_hash, EXCHANGE).unwrap()
        );
    }
}
