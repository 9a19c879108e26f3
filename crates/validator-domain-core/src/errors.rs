use thiserror::Error;
use validator_domain_codec::{CodecError, KeyType};

/// Errors raised while normalizing, encoding or checking a manifest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// Input matched none of the recognized manifest shapes.
    #[error("{0}")]
    MalformedInput(String),
    /// A binary manifest failed canonical decoding.
    #[error("Error Decoding Manifest: {0}")]
    DecodeError(CodecError),
    /// Canonical encoding of the manifest failed.
    #[error("cannot encode manifest: {0}")]
    Encode(CodecError),
    /// A signature the check requires is absent.
    #[error("manifest is missing a required signature")]
    SignatureMissing,
    /// The manifest carries no ephemeral key to check a signature against.
    #[error("manifest has no ephemeral key")]
    NoEphemeralKey,
    /// The key algorithm cannot be verified by this crate.
    #[error("unsupported key type {0:?}")]
    UnsupportedKeyType(KeyType),
}

/// Reasons a domain table does not have the expected layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// No `VALIDATORS` key.
    #[error("missing VALIDATORS list")]
    MissingValidators,
    /// `VALIDATORS` is not an array.
    #[error("VALIDATORS is not an array")]
    NotAnArray,
    /// An entry is not a table.
    #[error("VALIDATORS[{0}] is not a table")]
    EntryNotTable(usize),
    /// An entry field is missing or not a string.
    #[error("VALIDATORS[{index}].{field} is missing or not a string")]
    InvalidField {
        /// Position of the entry.
        index: usize,
        /// Name of the field.
        field: &'static str,
    },
}
