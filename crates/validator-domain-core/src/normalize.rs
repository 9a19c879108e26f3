//! Manifest shape detection and normalization.
//!
//! A manifest reaches us in one of four shapes:
//!
//! | shape        | keys                                                     |
//! |--------------|----------------------------------------------------------|
//! | binary       | hex string of the canonical encoding                     |
//! | decoded      | `PublicKey`, `MasterSignature`, `Sequence`, `Domain`, `SigningPubKey`, `Signature` |
//! | normalized   | `master_key`, `master_signature`, `seq`, `domain`, `ephemeral_key`, `signature` |
//! | rpc          | `master_key`, `master_signature`, `seq`, `domain`, `signing_key`, `signature`, `type` |
//!
//! Object shapes are matched against their exact key sets. Unknown keys,
//! mixed conventions and wrong value types are rejected rather than guessed.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;
use validator_domain_codec::{binary, fields, FieldId, FieldSet, FieldValue, NodePublicKey};

use crate::errors::ManifestError;
use crate::manifest::Manifest;

/// Manifest as returned by a binary decoder, with PascalCase field names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodedManifest {
    /// Master key, validator-address form.
    #[serde(rename = "PublicKey")]
    pub public_key: String,
    /// Master signature, hex.
    #[serde(rename = "MasterSignature")]
    pub master_signature: String,
    /// Sequence number.
    #[serde(rename = "Sequence")]
    pub sequence: u32,
    /// Domain name.
    #[serde(rename = "Domain", default, deserialize_with = "present")]
    pub domain: Option<String>,
    /// Ephemeral key, validator-address form.
    #[serde(rename = "SigningPubKey", default, deserialize_with = "present")]
    pub signing_pub_key: Option<String>,
    /// Ephemeral signature, hex.
    #[serde(rename = "Signature", default, deserialize_with = "present")]
    pub signature: Option<String>,
}

/// Manifest in the snake_case shape used by streaming feeds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizedManifest {
    /// Master key, validator-address form.
    pub master_key: String,
    /// Master signature, hex.
    pub master_signature: String,
    /// Sequence number.
    pub seq: u32,
    /// Domain name.
    #[serde(default, deserialize_with = "present")]
    pub domain: Option<String>,
    /// Ephemeral key, validator-address form.
    #[serde(default, deserialize_with = "present")]
    pub ephemeral_key: Option<String>,
    /// Ephemeral signature, hex.
    #[serde(default, deserialize_with = "present")]
    pub signature: Option<String>,
}

/// Manifest in the shape returned by the admin `manifest` query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpcManifest {
    /// Master key, validator-address form.
    pub master_key: String,
    /// Master signature, hex.
    pub master_signature: String,
    /// Sequence number.
    pub seq: u32,
    /// Domain name.
    #[serde(default, deserialize_with = "present")]
    pub domain: Option<String>,
    /// Ephemeral key, validator-address form.
    #[serde(default, deserialize_with = "present")]
    pub signing_key: Option<String>,
    /// Ephemeral signature, hex.
    #[serde(default, deserialize_with = "present")]
    pub signature: Option<String>,
    /// Response tag; ignored.
    #[serde(rename = "type", default)]
    pub kind: Option<Value>,
}

/// Optional string field that may be omitted but not `null`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    String::deserialize(deserializer).map(Some)
}

/// Closed set of recognized manifest inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawManifest {
    /// Hex string of the canonical binary encoding.
    Binary(String),
    /// PascalCase decoded-field object.
    Decoded(DecodedManifest),
    /// snake_case object with `ephemeral_key`.
    Normalized(NormalizedManifest),
    /// snake_case object with `signing_key`.
    Rpc(RpcManifest),
}

impl RawManifest {
    /// Routes a JSON value to the variant whose shape it matches exactly.
    ///
    /// Only strings take the binary path.
    pub fn from_json(value: &Value) -> Result<Self, ManifestError> {
        match value {
            Value::String(s) => Ok(RawManifest::Binary(s.clone())),
            Value::Object(_) => {
                if let Ok(m) = DecodedManifest::deserialize(value) {
                    return Ok(RawManifest::Decoded(m));
                }
                if let Ok(m) = NormalizedManifest::deserialize(value) {
                    return Ok(RawManifest::Normalized(m));
                }
                if let Ok(m) = RpcManifest::deserialize(value) {
                    return Ok(RawManifest::Rpc(m));
                }
                Err(ManifestError::MalformedInput(format!(
                    "Unrecognized Manifest format {}",
                    value
                )))
            }
            other => Err(ManifestError::MalformedInput(format!(
                "Unrecognized Manifest format {}",
                other
            ))),
        }
    }
}

/// Normalizes any recognized manifest shape into a [`Manifest`].
pub fn normalize(input: RawManifest) -> Result<Manifest, ManifestError> {
    match input {
        RawManifest::Binary(hex) => from_binary(&hex),
        RawManifest::Decoded(m) => from_text_fields(TextFields {
            master_key: &m.public_key,
            master_signature: &m.master_signature,
            seq: m.sequence,
            domain: m.domain.as_deref(),
            ephemeral_key: m.signing_pub_key.as_deref(),
            signature: m.signature.as_deref(),
        }),
        RawManifest::Normalized(m) => from_text_fields(TextFields {
            master_key: &m.master_key,
            master_signature: &m.master_signature,
            seq: m.seq,
            domain: m.domain.as_deref(),
            ephemeral_key: m.ephemeral_key.as_deref(),
            signature: m.signature.as_deref(),
        }),
        RawManifest::Rpc(m) => from_text_fields(TextFields {
            master_key: &m.master_key,
            master_signature: &m.master_signature,
            seq: m.seq,
            domain: m.domain.as_deref(),
            ephemeral_key: m.signing_key.as_deref(),
            signature: m.signature.as_deref(),
        }),
    }
}

/// Detects the shape of a JSON value and normalizes it.
pub fn normalize_json(value: &Value) -> Result<Manifest, ManifestError> {
    normalize(RawManifest::from_json(value)?)
}

/// Borrowed view shared by the three object shapes.
struct TextFields<'a> {
    master_key: &'a str,
    master_signature: &'a str,
    seq: u32,
    domain: Option<&'a str>,
    ephemeral_key: Option<&'a str>,
    signature: Option<&'a str>,
}

fn from_text_fields(fields: TextFields<'_>) -> Result<Manifest, ManifestError> {
    let master_key = parse_address("master key", fields.master_key)?;
    let master_signature = parse_hex("master signature", fields.master_signature)?;
    let ephemeral_key = non_empty(fields.ephemeral_key)
        .map(|key| parse_address("ephemeral key", key))
        .transpose()?;
    let signature = non_empty(fields.signature)
        .map(|sig| parse_hex("signature", sig))
        .transpose()?;

    Ok(Manifest {
        seq: fields.seq,
        master_key,
        master_signature,
        domain: non_empty(fields.domain).map(str::to_string),
        ephemeral_key,
        signature,
    })
}

fn from_binary(encoded: &str) -> Result<Manifest, ManifestError> {
    let bytes = hex::decode(encoded.trim()).map_err(|e| {
        ManifestError::MalformedInput(format!("manifest string is not hex: {}", e))
    })?;
    let mut set = binary::decode(&bytes).map_err(ManifestError::DecodeError)?;
    debug!(fields = set.len(), "decoded binary manifest");

    let seq = match set.remove(fields::SEQUENCE) {
        Some(FieldValue::UInt32(seq)) => seq,
        _ => return Err(missing(fields::SEQUENCE)),
    };
    let master_key =
        take_key(&mut set, fields::PUBLIC_KEY)?.ok_or_else(|| missing(fields::PUBLIC_KEY))?;
    let master_signature = take_blob(&mut set, fields::MASTER_SIGNATURE)
        .ok_or_else(|| missing(fields::MASTER_SIGNATURE))?;
    let ephemeral_key = take_key(&mut set, fields::SIGNING_PUB_KEY)?;
    let signature = take_blob(&mut set, fields::SIGNATURE).filter(|sig| !sig.is_empty());
    let domain = take_blob(&mut set, fields::DOMAIN)
        .filter(|bytes| !bytes.is_empty())
        .map(String::from_utf8)
        .transpose()
        .map_err(|_| ManifestError::MalformedInput("Domain is not valid UTF-8".into()))?;

    if let Some(extra) = set.ids().next() {
        return Err(ManifestError::MalformedInput(format!(
            "Unrecognized Manifest Format: unexpected field {}",
            extra
        )));
    }

    Ok(Manifest {
        seq,
        master_key,
        master_signature,
        domain,
        ephemeral_key,
        signature,
    })
}

fn take_blob(set: &mut FieldSet, id: FieldId) -> Option<Vec<u8>> {
    match set.remove(id) {
        Some(FieldValue::Blob(bytes)) => Some(bytes),
        _ => None,
    }
}

fn take_key(set: &mut FieldSet, id: FieldId) -> Result<Option<NodePublicKey>, ManifestError> {
    take_blob(set, id)
        .filter(|bytes| !bytes.is_empty())
        .map(|bytes| {
            NodePublicKey::from_bytes(&bytes)
                .map_err(|e| ManifestError::MalformedInput(format!("{}: {}", id, e)))
        })
        .transpose()
}

fn missing(id: FieldId) -> ManifestError {
    ManifestError::MalformedInput(format!("Unrecognized Manifest Format: missing {}", id))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_address(what: &str, value: &str) -> Result<NodePublicKey, ManifestError> {
    NodePublicKey::from_address(value)
        .map_err(|e| ManifestError::MalformedInput(format!("invalid {} {}: {}", what, value, e)))
}

fn parse_hex(what: &str, value: &str) -> Result<Vec<u8>, ManifestError> {
    hex::decode(value)
        .map_err(|e| ManifestError::MalformedInput(format!("invalid {} {}: {}", what, value, e)))
}
