//! Codec primitives for validator manifests.
//!
//! Two capabilities live here:
//! - the validator-address codec that turns 33-byte node public keys into
//!   their base58 `n...` form and back;
//! - the canonical binary field codec used both on the wire and as the exact
//!   payload over which manifest signatures are computed.
//!
//! Nothing in this crate knows what a manifest *means*; it only knows how the
//! bytes are laid out.
//!
#![deny(missing_docs)]

/// Validator-address (node public key) codec.
pub mod address;
/// Canonical binary encoding of typed field sets.
pub mod binary;
/// Codec error types.
pub mod errors;
/// Field identifiers used by validator manifests.
pub mod fields;

pub use address::{KeyType, NodePublicKey};
pub use binary::{decode, encode, FieldId, FieldSet, FieldValue};
pub use errors::CodecError;
