use serde_json::Value;
use tracing::{debug, info_span, warn};

use crate::normalize::normalize_json;
use crate::signature::Verifier;
use crate::verdict::{FailureReason, VerificationResult};

/// Supplies the parsed `xrp-ledger.toml` table for a domain.
///
/// Errors mean verification could not be completed, which callers must keep
/// distinct from a failed verification.
pub trait TableSource {
    /// Error raised when the table cannot be obtained.
    type Error: std::error::Error;

    /// Fetches and parses the table published by `domain`.
    fn fetch(&self, domain: &str) -> Result<toml::Table, Self::Error>;
}

/// Verifies a validator's domain claim end to end.
///
/// Steps: normalize, require a domain, verify the master signature, fetch the
/// domain table, run the attestation protocol. Every recognized failure is
/// returned as [`VerificationResult::Failure`]; only table source errors
/// propagate.
pub fn verify_validator_domain<S: TableSource>(
    input: &Value,
    source: &S,
) -> Result<VerificationResult, S::Error> {
    let span = info_span!("verify_validator_domain");
    let _guard = span.enter();

    let manifest = match normalize_json(input) {
        Ok(manifest) => manifest,
        Err(err) => {
            warn!(error = %err, "cannot normalize manifest");
            return Ok(VerificationResult::Failure {
                reason: err.into(),
                manifest: None,
            });
        }
    };
    debug!(master_key = %manifest.master_key, seq = manifest.seq, "normalized manifest");

    let Some(domain) = manifest.domain.clone() else {
        return Ok(VerificationResult::failure(
            FailureReason::NoDomainConfigured,
            manifest,
        ));
    };

    let verifier = Verifier::new();
    match verifier.verify_master_signature(&manifest) {
        Ok(true) => {}
        Ok(false) => {
            warn!(master_key = %manifest.master_key, "manifest signature is invalid");
            return Ok(VerificationResult::failure(
                FailureReason::ManifestSignatureInvalid,
                manifest,
            ));
        }
        Err(err) => return Ok(VerificationResult::failure(err.into(), manifest)),
    }

    debug!(%domain, "fetching domain table");
    let table = source.fetch(&domain)?;
    Ok(verifier.verify_domain(manifest, &table))
}
