use serde::Serialize;
use validator_domain_codec::NodePublicKey;

/// Canonical manifest record.
///
/// Every recognized input shape normalizes to this type. Serialized with
/// snake_case keys, validator-address keys and uppercase hex signatures;
/// absent optionals are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Sequence number.
    pub seq: u32,
    /// Long-term identity key that signs the manifest.
    pub master_key: NodePublicKey,
    /// Signature over the signing form by `master_key`.
    #[serde(serialize_with = "hex_upper")]
    pub master_signature: Vec<u8>,
    /// Domain the validator claims.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Short-term signing key authorized by the manifest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ephemeral_key: Option<NodePublicKey>,
    /// Signature over the signing form by `ephemeral_key`.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "hex_upper_opt"
    )]
    pub signature: Option<Vec<u8>>,
}

fn hex_upper<S: serde::Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode_upper(bytes))
}

fn hex_upper_opt<S: serde::Serializer>(
    bytes: &Option<Vec<u8>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match bytes {
        Some(bytes) => hex_upper(bytes, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_snake_case_and_omits_absent_fields() {
        let manifest = Manifest {
            seq: 1,
            master_key: "nHU2Y1mLGDvTbc2dpvpkQ16qdeTKv2aJwGJHFySSB9U3jkTmj4CA"
                .parse()
                .unwrap(),
            master_signature: vec![0xba, 0xda, 0x55],
            domain: None,
            ephemeral_key: None,
            signature: None,
        };

        assert_eq!(
            serde_json::to_value(&manifest).unwrap(),
            json!({
                "seq": 1,
                "master_key": "nHU2Y1mLGDvTbc2dpvpkQ16qdeTKv2aJwGJHFySSB9U3jkTmj4CA",
                "master_signature": "BADA55"
            })
        );
        assert!(manifest.domain.is_none());
    }
}
