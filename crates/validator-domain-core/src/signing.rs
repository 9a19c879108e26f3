//! Signing-form reconstruction.
//!
//! The master key signs `b"MAN\0" || encode(fields - {Signature, MasterSignature})`
//! where keys are raw prefixed key bytes and the domain is raw UTF-8. The
//! normalizer decodes exactly these representations, so re-encoding a decoded
//! manifest must reproduce the signed bytes bit for bit.

use validator_domain_codec::{binary, fields, FieldSet, FieldValue};

use crate::errors::ManifestError;
use crate::manifest::Manifest;

/// Domain-separation prefix for manifest signatures: `b"MAN\0"`.
pub const MANIFEST_PREFIX: &[u8; 4] = b"MAN\0";

/// Every manifest field, signatures included.
pub fn to_field_set(manifest: &Manifest) -> Result<FieldSet, ManifestError> {
    let mut set = FieldSet::new();
    put(&mut set, fields::SEQUENCE, FieldValue::UInt32(manifest.seq))?;
    put(
        &mut set,
        fields::PUBLIC_KEY,
        FieldValue::Blob(manifest.master_key.as_bytes().to_vec()),
    )?;
    if let Some(key) = &manifest.ephemeral_key {
        put(
            &mut set,
            fields::SIGNING_PUB_KEY,
            FieldValue::Blob(key.as_bytes().to_vec()),
        )?;
    }
    if let Some(signature) = &manifest.signature {
        put(
            &mut set,
            fields::SIGNATURE,
            FieldValue::Blob(signature.clone()),
        )?;
    }
    if let Some(domain) = &manifest.domain {
        put(
            &mut set,
            fields::DOMAIN,
            FieldValue::Blob(domain.as_bytes().to_vec()),
        )?;
    }
    put(
        &mut set,
        fields::MASTER_SIGNATURE,
        FieldValue::Blob(manifest.master_signature.clone()),
    )?;
    Ok(set)
}

/// Every manifest field except the two signatures.
pub fn signing_fields(manifest: &Manifest) -> Result<FieldSet, ManifestError> {
    let mut set = to_field_set(manifest)?;
    let unsigned: Vec<_> = set.ids().filter(|id| fields::is_signature_field(*id)).collect();
    for id in unsigned {
        set.remove(id);
    }
    Ok(set)
}

/// Bytes the master and ephemeral keys sign.
pub fn signing_form(manifest: &Manifest) -> Result<Vec<u8>, ManifestError> {
    let encoded = binary::encode(&signing_fields(manifest)?).map_err(ManifestError::Encode)?;

    let mut out = Vec::with_capacity(MANIFEST_PREFIX.len() + encoded.len());
    out.extend_from_slice(MANIFEST_PREFIX);
    out.extend_from_slice(&encoded);
    Ok(out)
}

/// Full canonical encoding, signatures included.
///
/// Inverse of the binary normalization path.
pub fn encode_manifest(manifest: &Manifest) -> Result<Vec<u8>, ManifestError> {
    binary::encode(&to_field_set(manifest)?).map_err(ManifestError::Encode)
}

fn put(
    set: &mut FieldSet,
    id: validator_domain_codec::FieldId,
    value: FieldValue,
) -> Result<(), ManifestError> {
    set.insert(id, value).map_err(ManifestError::Encode)
}
