//! Domain attestation protocol.
//!
//! A domain operator proves control of a validator by publishing, in
//! `https://<domain>/.well-known/xrp-ledger.toml`, a `VALIDATORS` entry whose
//! `attestation` is the master key's signature over
//! `[domain-attestation-blob:<domain>:<master key address>]`.

use tracing::{debug, warn};
use validator_domain_codec::NodePublicKey;

use crate::errors::TableError;
use crate::manifest::Manifest;
use crate::signature::Verifier;
use crate::verdict::{FailureReason, VerificationResult};

/// Key of the validator list in the domain table.
pub const VALIDATORS_KEY: &str = "VALIDATORS";

/// One `[[VALIDATORS]]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorTableEntry {
    /// Validator-address form of the key the entry describes.
    pub public_key: String,
    /// Hex attestation signature, if the entry carries one.
    pub attestation: Option<String>,
}

/// The parts of a domain table the attestation protocol reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorTable {
    /// Entries in document order.
    pub validators: Vec<ValidatorTableEntry>,
}

impl ValidatorTable {
    /// Extracts the validator list from a parsed TOML table.
    ///
    /// Every entry must carry a string `public_key`; `attestation` is only
    /// required of entries that match the key being verified.
    pub fn from_toml(table: &toml::Table) -> Result<Self, TableError> {
        let list = table
            .get(VALIDATORS_KEY)
            .ok_or(TableError::MissingValidators)?
            .as_array()
            .ok_or(TableError::NotAnArray)?;

        let validators = list
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let entry = value.as_table().ok_or(TableError::EntryNotTable(index))?;
                let public_key = entry
                    .get("public_key")
                    .and_then(|v| v.as_str())
                    .ok_or(TableError::InvalidField {
                        index,
                        field: "public_key",
                    })?;
                let attestation = match entry.get("attestation") {
                    None => None,
                    Some(v) => Some(
                        v.as_str()
                            .ok_or(TableError::InvalidField {
                                index,
                                field: "attestation",
                            })?
                            .to_string(),
                    ),
                };
                Ok(ValidatorTableEntry {
                    public_key: public_key.to_string(),
                    attestation,
                })
            })
            .collect::<Result<Vec<_>, TableError>>()?;

        Ok(Self { validators })
    }

    /// Entries naming `key`, compared in validator-address form.
    pub fn matching(
        &self,
        key: &NodePublicKey,
    ) -> impl Iterator<Item = &ValidatorTableEntry> + '_ {
        let address = key.to_address();
        self.validators
            .iter()
            .filter(move |entry| entry.public_key == address)
    }
}

/// Message a domain's attestation signs.
pub fn attestation_message(domain: &str, key: &NodePublicKey) -> Vec<u8> {
    format!("[domain-attestation-blob:{}:{}]", domain, key.to_address()).into_bytes()
}

impl Verifier {
    /// Runs the attestation protocol for an authenticated manifest.
    ///
    /// The caller must already have verified the manifest's master signature.
    /// Any matching entry with a bad or missing attestation fails the whole
    /// check; remaining entries are not consulted.
    pub fn verify_domain(&self, manifest: Manifest, table: &toml::Table) -> VerificationResult {
        let Some(domain) = manifest.domain.clone() else {
            return VerificationResult::failure(FailureReason::NoDomainConfigured, manifest);
        };

        let validators = match ValidatorTable::from_toml(table) {
            Ok(validators) => validators,
            Err(err) => {
                warn!(%domain, error = %err, "domain table has unexpected layout");
                return VerificationResult::failure(FailureReason::InvalidTableFormat, manifest);
            }
        };

        let matching: Vec<_> = validators.matching(&manifest.master_key).collect();
        if matching.is_empty() {
            warn!(%domain, master_key = %manifest.master_key, "no matching validator entry");
            return VerificationResult::failure(FailureReason::NoMatchingKey, manifest);
        }

        let message = attestation_message(&domain, &manifest.master_key);
        for entry in matching {
            let signature = entry
                .attestation
                .as_deref()
                .and_then(|hex_sig| hex::decode(hex_sig).ok());
            let valid = signature
                .map(|sig| self.verify(&message, &sig, &manifest.master_key))
                .unwrap_or(false);
            if !valid {
                warn!(%domain, "attestation does not verify");
                return VerificationResult::failure(
                    FailureReason::InvalidAttestation { domain },
                    manifest,
                );
            }
        }

        debug!(%domain, "domain attestation verified");
        VerificationResult::Success { domain, manifest }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> NodePublicKey {
        "nHUcNC5ni7XjVYfCMe38Rm3KQaq27jw7wJpcUYdo4miWwpNePRTw"
            .parse()
            .unwrap()
    }

    #[test]
    fn message_layout() {
        assert_eq!(
            attestation_message("rabbitkick.club", &key()),
            b"[domain-attestation-blob:rabbitkick.club:nHUcNC5ni7XjVYfCMe38Rm3KQaq27jw7wJpcUYdo4miWwpNePRTw]"
                .to_vec()
        );
    }

    #[test]
    fn table_without_validators_is_rejected() {
        let table: toml::Table = toml::from_str("[METADATA]\nmodified = 1").unwrap();
        assert_eq!(
            ValidatorTable::from_toml(&table),
            Err(TableError::MissingValidators)
        );
    }

    #[test]
    fn validators_must_be_an_array() {
        let table: toml::Table = toml::from_str("VALIDATORS = \"none\"").unwrap();
        assert_eq!(
            ValidatorTable::from_toml(&table),
            Err(TableError::NotAnArray)
        );
    }

    #[test]
    fn entries_need_a_public_key() {
        let table: toml::Table =
            toml::from_str("[[VALIDATORS]]\nattestation = \"AA\"\n").unwrap();
        assert_eq!(
            ValidatorTable::from_toml(&table),
            Err(TableError::InvalidField {
                index: 0,
                field: "public_key"
            })
        );
    }

    #[test]
    fn matching_compares_addresses() {
        let table: toml::Table = toml::from_str(
            r#"
            [[VALIDATORS]]
            public_key = "nHBd6ZRXfG353vtK1kwCahqbMk6BAqUz57rVy77Do5YTBG8LHkye"

            [[VALIDATORS]]
            public_key = "nHUcNC5ni7XjVYfCMe38Rm3KQaq27jw7wJpcUYdo4miWwpNePRTw"
            attestation = "00"
            "#,
        )
        .unwrap();
        let parsed = ValidatorTable::from_toml(&table).unwrap();
        let key = key();
        let matches: Vec<_> = parsed.matching(&key).collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].attestation.as_deref(), Some("00"));
    }
}
