use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CodecError;

/// Version byte prefixed to node public keys before base58 encoding.
pub const NODE_PUBLIC_VERSION: u8 = 0x1C;

/// Length of a typed public key: one type byte plus 32 key bytes.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Signature algorithm denoted by the first byte of a node public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// `0xED` prefix followed by a 32-byte Ed25519 point.
    Ed25519,
    /// `0x02` / `0x03` prefix of a compressed secp256k1 point.
    Secp256k1,
}

impl KeyType {
    fn from_prefix(prefix: u8) -> Option<Self> {
        match prefix {
            0xED => Some(KeyType::Ed25519),
            0x02 | 0x03 => Some(KeyType::Secp256k1),
            _ => None,
        }
    }
}

/// A 33-byte validator public key.
///
/// The raw form carries its key-type prefix. External representations use the
/// base58 validator-address form (`n9...` / `nH...`), which is what
/// [`Display`](fmt::Display), [`FromStr`] and serde produce and accept.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct NodePublicKey([u8; PUBLIC_KEY_LEN]);

impl NodePublicKey {
    /// Builds a key from its raw prefixed bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let raw: [u8; PUBLIC_KEY_LEN] = bytes.try_into().map_err(|_| {
            CodecError::InvalidKey(format!(
                "expected {} bytes, got {}",
                PUBLIC_KEY_LEN,
                bytes.len()
            ))
        })?;
        if KeyType::from_prefix(raw[0]).is_none() {
            return Err(CodecError::InvalidKey(format!(
                "unknown key type prefix 0x{:02X}",
                raw[0]
            )));
        }
        Ok(Self(raw))
    }

    /// Decodes a validator-address string.
    ///
    /// The base58check checksum and version byte are verified by `bs58`; the
    /// decoded payload keeps the version byte and drops the checksum.
    pub fn from_address(address: &str) -> Result<Self, CodecError> {
        let payload = bs58::decode(address)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .with_check(Some(NODE_PUBLIC_VERSION))
            .into_vec()
            .map_err(|e| match e {
                bs58::decode::Error::InvalidChecksum { .. } => CodecError::Checksum,
                bs58::decode::Error::InvalidVersion { ver, .. } => CodecError::AddressVersion(ver),
                other => CodecError::Base58(other.to_string()),
            })?;

        if payload.len() != 1 + PUBLIC_KEY_LEN {
            return Err(CodecError::AddressLength(payload.len()));
        }

        Self::from_bytes(&payload[1..])
    }

    /// Encodes the key in validator-address form.
    pub fn to_address(&self) -> String {
        bs58::encode(self.0)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .with_check_version(NODE_PUBLIC_VERSION)
            .into_string()
    }

    /// Raw prefixed key bytes, as they appear in the binary encoding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key algorithm denoted by the prefix byte.
    pub fn key_type(&self) -> KeyType {
        match self.0[0] {
            0xED => KeyType::Ed25519,
            _ => KeyType::Secp256k1,
        }
    }

    /// The bare 32-byte Ed25519 key, with the type prefix stripped.
    ///
    /// This is the only place the prefix is removed. Returns `None` for
    /// secp256k1 keys.
    pub fn ed25519_bytes(&self) -> Option<[u8; 32]> {
        if self.key_type() != KeyType::Ed25519 {
            return None;
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&self.0[1..]);
        Some(key)
    }
}

impl fmt::Display for NodePublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_address())
    }
}

impl fmt::Debug for NodePublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodePublicKey({})", self.to_address())
    }
}

impl FromStr for NodePublicKey {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_address(s)
    }
}

impl Serialize for NodePublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_address())
    }
}

impl<'de> Deserialize<'de> for NodePublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let address = String::deserialize(deserializer)?;
        Self::from_address(&address).map_err(serde::de::Error::custom)
    }
}
