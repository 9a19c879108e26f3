use ed25519_dalek::{Signature, Verifier as _, VerifyingKey};
use tracing::debug;
use validator_domain_codec::{KeyType, NodePublicKey};

use crate::errors::ManifestError;
use crate::manifest::Manifest;
use crate::signing::signing_form;

/// Stateless Ed25519 verifier for manifests and attestations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verifier;

impl Verifier {
    /// Creates a verifier.
    pub fn new() -> Self {
        Self
    }

    /// Verifies `signature` over `message` with `key`.
    ///
    /// Never fails: malformed signatures, malformed keys and non-Ed25519 keys
    /// all yield `false`.
    pub fn verify(&self, message: &[u8], signature: &[u8], key: &NodePublicKey) -> bool {
        let Some(raw) = key.ed25519_bytes() else {
            return false;
        };
        let Ok(verifying_key) = VerifyingKey::from_bytes(&raw) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return false;
        };
        verifying_key.verify(message, &signature).is_ok()
    }

    /// Checks the master signature against the reconstructed signing form.
    pub fn verify_master_signature(&self, manifest: &Manifest) -> Result<bool, ManifestError> {
        if manifest.master_signature.is_empty() {
            return Err(ManifestError::SignatureMissing);
        }
        let message = signing_form(manifest)?;
        let valid = self.verify(&message, &manifest.master_signature, &manifest.master_key);
        debug!(master_key = %manifest.master_key, valid, "checked master signature");
        Ok(valid)
    }

    /// Checks the ephemeral signature, when the ephemeral key is Ed25519.
    ///
    /// secp256k1 ephemeral keys are reported as
    /// [`ManifestError::UnsupportedKeyType`].
    pub fn verify_ephemeral_signature(&self, manifest: &Manifest) -> Result<bool, ManifestError> {
        let key = manifest
            .ephemeral_key
            .as_ref()
            .ok_or(ManifestError::NoEphemeralKey)?;
        let signature = manifest
            .signature
            .as_deref()
            .ok_or(ManifestError::SignatureMissing)?;
        if key.key_type() != KeyType::Ed25519 {
            return Err(ManifestError::UnsupportedKeyType(key.key_type()));
        }
        let message = signing_form(manifest)?;
        Ok(self.verify(&message, signature, key))
    }
}
