use crate::binary::FieldId;

/// `Sequence`: manifest sequence number (UInt32).
pub const SEQUENCE: FieldId = FieldId::new(2, 4);
/// `PublicKey`: master public key (Blob).
pub const PUBLIC_KEY: FieldId = FieldId::new(7, 1);
/// `SigningPubKey`: ephemeral signing key (Blob).
pub const SIGNING_PUB_KEY: FieldId = FieldId::new(7, 3);
/// `Signature`: signature by the ephemeral key (Blob).
pub const SIGNATURE: FieldId = FieldId::new(7, 6);
/// `Domain`: UTF-8 domain name bytes (Blob).
pub const DOMAIN: FieldId = FieldId::new(7, 7);
/// `MasterSignature`: signature by the master key (Blob).
pub const MASTER_SIGNATURE: FieldId = FieldId::new(7, 18);

const NAMED: &[(&str, FieldId)] = &[
    ("Sequence", SEQUENCE),
    ("PublicKey", PUBLIC_KEY),
    ("SigningPubKey", SIGNING_PUB_KEY),
    ("Signature", SIGNATURE),
    ("Domain", DOMAIN),
    ("MasterSignature", MASTER_SIGNATURE),
];

/// Name of a known manifest field.
pub fn field_name(id: FieldId) -> Option<&'static str> {
    NAMED
        .iter()
        .find(|(_, known)| *known == id)
        .map(|(name, _)| *name)
}

/// Fields that are excluded from the signed payload.
pub fn is_signature_field(id: FieldId) -> bool {
    id == SIGNATURE || id == MASTER_SIGNATURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fields_are_named() {
        for (name, id) in NAMED {
            assert_eq!(field_name(*id), Some(*name));
        }
        assert_eq!(field_name(FieldId::new(2, 2)), None);
    }

    #[test]
    fn only_signatures_are_unsigned() {
        assert!(is_signature_field(SIGNATURE));
        assert!(is_signature_field(MASTER_SIGNATURE));
        assert!(!is_signature_field(DOMAIN));
        assert!(!is_signature_field(PUBLIC_KEY));
    }
}
