//! Domain verification for network validators.
//!
//! This crate provides:
//! - Normalization of the several wire shapes a validator manifest arrives in
//! - Reconstruction of the exact bytes a manifest's master key signed
//! - Ed25519 verification of manifest and domain attestation signatures
//! - The domain attestation protocol over a parsed `xrp-ledger.toml` table
//!
//! Core invariants:
//! - A manifest that fails its own signature check never reaches attestation
//! - The key-type prefix is stripped in exactly one place
//!   ([`NodePublicKey::ed25519_bytes`](validator_domain_codec::NodePublicKey::ed25519_bytes))
//! - Verification is a pure function of its inputs; only the table fetch,
//!   behind [`TableSource`], performs I/O
//!
#![deny(missing_docs)]

/// Domain attestation protocol.
pub mod attestation;
/// Error types for manifest handling.
pub mod errors;
/// Canonical manifest record.
pub mod manifest;
/// Manifest shape detection and normalization.
pub mod normalize;
/// End-to-end verification entry point.
pub mod pipeline;
/// Ed25519 signature verification.
pub mod signature;
/// Signing-form reconstruction.
pub mod signing;
/// Verification outcomes and reports.
pub mod verdict;

pub use attestation::{attestation_message, ValidatorTable, ValidatorTableEntry};
pub use errors::{ManifestError, TableError};
pub use manifest::Manifest;
pub use normalize::{
    normalize, normalize_json, DecodedManifest, NormalizedManifest, RawManifest, RpcManifest,
};
pub use pipeline::{verify_validator_domain, TableSource};
pub use signature::Verifier;
pub use signing::{encode_manifest, signing_fields, signing_form, to_field_set, MANIFEST_PREFIX};
pub use verdict::{FailureReason, ReportStatus, VerificationReport, VerificationResult};
