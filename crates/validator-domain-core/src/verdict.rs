use serde::Serialize;
use thiserror::Error;

use crate::errors::ManifestError;
use crate::manifest::Manifest;

/// Why a verification failed.
///
/// The display text of each variant is the user-facing report message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Input matched none of the recognized manifest shapes.
    #[error("Cannot Parse Manifest: {0}")]
    MalformedInput(String),
    /// Binary manifest failed canonical decoding.
    #[error("Cannot Parse Manifest: {0}")]
    DecodeError(String),
    /// A required signature is absent.
    #[error("Manifest does not contain a signature")]
    SignatureMissing,
    /// The master signature does not verify.
    #[error("Cannot verify manifest signature")]
    ManifestSignatureInvalid,
    /// The manifest does not claim a domain.
    #[error("Manifest does not contain a domain")]
    NoDomainConfigured,
    /// The domain table has no usable `VALIDATORS` list.
    #[error("Invalid .toml file")]
    InvalidTableFormat,
    /// No table entry names the manifest's master key.
    #[error(".toml file does not have matching public key")]
    NoMatchingKey,
    /// A matching entry's attestation does not verify.
    #[error("Invalid attestation, cannot verify {domain}")]
    InvalidAttestation {
        /// Domain being verified.
        domain: String,
    },
}

impl FailureReason {
    /// Stable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FailureReason::MalformedInput(_) => "MalformedInput",
            FailureReason::DecodeError(_) => "DecodeError",
            FailureReason::SignatureMissing => "SignatureMissing",
            FailureReason::ManifestSignatureInvalid => "ManifestSignatureInvalid",
            FailureReason::NoDomainConfigured => "NoDomainConfigured",
            FailureReason::InvalidTableFormat => "InvalidTableFormat",
            FailureReason::NoMatchingKey => "NoMatchingKey",
            FailureReason::InvalidAttestation { .. } => "InvalidAttestation",
        }
    }
}

impl From<ManifestError> for FailureReason {
    fn from(err: ManifestError) -> Self {
        match err {
            ManifestError::DecodeError(_) => FailureReason::DecodeError(err.to_string()),
            ManifestError::SignatureMissing | ManifestError::NoEphemeralKey => {
                FailureReason::SignatureMissing
            }
            ManifestError::UnsupportedKeyType(_) => FailureReason::ManifestSignatureInvalid,
            ManifestError::MalformedInput(_) | ManifestError::Encode(_) => {
                FailureReason::MalformedInput(err.to_string())
            }
        }
    }
}

/// Outcome of one verification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// The domain attests to the manifest's master key.
    Success {
        /// Verified domain.
        domain: String,
        /// Normalized manifest.
        manifest: Manifest,
    },
    /// Verification failed.
    Failure {
        /// Failure kind.
        reason: FailureReason,
        /// Normalized manifest, when normalization got that far.
        manifest: Option<Manifest>,
    },
}

impl VerificationResult {
    pub(crate) fn failure(reason: FailureReason, manifest: Manifest) -> Self {
        VerificationResult::Failure {
            reason,
            manifest: Some(manifest),
        }
    }

    /// Whether the domain was verified.
    pub fn is_success(&self) -> bool {
        matches!(self, VerificationResult::Success { .. })
    }

    /// Failure kind, if any.
    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            VerificationResult::Success { .. } => None,
            VerificationResult::Failure { reason, .. } => Some(reason),
        }
    }

    /// Normalized manifest, if normalization succeeded.
    pub fn manifest(&self) -> Option<&Manifest> {
        match self {
            VerificationResult::Success { manifest, .. } => Some(manifest),
            VerificationResult::Failure { manifest, .. } => manifest.as_ref(),
        }
    }

    /// Human-readable outcome.
    pub fn message(&self) -> String {
        match self {
            VerificationResult::Success { domain, .. } => format!("{} has been verified", domain),
            VerificationResult::Failure { reason, .. } => reason.to_string(),
        }
    }

    /// External `{status, message, manifest}` encoding.
    pub fn report(&self) -> VerificationReport {
        VerificationReport {
            status: if self.is_success() {
                ReportStatus::Success
            } else {
                ReportStatus::Error
            },
            message: self.message(),
            manifest: self.manifest().cloned(),
        }
    }
}

/// Report status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// Domain verified.
    Success,
    /// Verification failed.
    Error,
}

/// Serializable verification report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// `success` or `error`.
    pub status: ReportStatus,
    /// Human-readable outcome.
    pub message: String,
    /// Normalized manifest; `{}` when normalization failed.
    #[serde(serialize_with = "manifest_or_empty")]
    pub manifest: Option<Manifest>,
}

fn manifest_or_empty<S: serde::Serializer>(
    manifest: &Option<Manifest>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;
    match manifest {
        Some(manifest) => manifest.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failed_parse_reports_empty_manifest() {
        let result = VerificationResult::Failure {
            reason: FailureReason::MalformedInput("Unrecognized Manifest format 42".into()),
            manifest: None,
        };
        assert_eq!(
            serde_json::to_value(result.report()).unwrap(),
            json!({
                "status": "error",
                "message": "Cannot Parse Manifest: Unrecognized Manifest format 42",
                "manifest": {}
            })
        );
        assert_eq!(result.reason().unwrap().kind(), "MalformedInput");
    }

    #[test]
    fn attestation_message_names_domain() {
        let reason = FailureReason::InvalidAttestation {
            domain: "example.com".into(),
        };
        assert_eq!(
            reason.to_string(),
            "Invalid attestation, cannot verify example.com"
        );
    }

    #[test]
    fn manifest_errors_map_to_failure_kinds() {
        assert_eq!(
            FailureReason::from(ManifestError::SignatureMissing),
            FailureReason::SignatureMissing
        );
        assert_eq!(
            FailureReason::from(ManifestError::MalformedInput("bad".into())).kind(),
            "MalformedInput"
        );
    }
}
