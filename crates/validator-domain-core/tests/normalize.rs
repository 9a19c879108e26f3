mod common;

use common::*;
use serde_json::json;
use validator_domain_core::{
    encode_manifest, normalize, normalize_json, ManifestError, RawManifest,
};

#[test]
fn all_shapes_normalize_identically() {
    let from_binary = normalize_json(&json!(RABBITKICK_MANIFEST)).unwrap();
    let from_decoded = normalize_json(&rabbitkick_decoded()).unwrap();
    let from_rpc = normalize_json(&rabbitkick_rpc()).unwrap();
    let from_normalized = normalize_json(&rabbitkick_normalized()).unwrap();

    assert_eq!(from_binary, from_decoded);
    assert_eq!(from_binary, from_rpc);
    assert_eq!(from_binary, from_normalized);

    assert_eq!(from_binary.seq, 123);
    assert_eq!(from_binary.domain.as_deref(), Some("rabbitkick.club"));
    assert_eq!(from_binary.master_key.to_address(), RABBITKICK_MASTER);
    assert_eq!(
        from_binary.ephemeral_key.as_ref().map(|k| k.to_address()),
        Some(RABBITKICK_SIGNING.to_string())
    );
}

#[test]
fn normalized_output_is_snake_case() {
    let manifest = normalize_json(&rabbitkick_decoded()).unwrap();
    assert_eq!(serde_json::to_value(&manifest).unwrap(), rabbitkick_normalized());
}

#[test]
fn lowercase_hex_signatures_normalize_to_same_bytes() {
    let mut lower = rabbitkick_rpc();
    lower["master_signature"] = json!(RABBITKICK_MASTER_SIGNATURE.to_lowercase());
    assert_eq!(
        normalize_json(&lower).unwrap(),
        normalize_json(&rabbitkick_rpc()).unwrap()
    );
}

#[test]
fn historical_manifests_reencode_exactly() {
    for hex_manifest in [
        RABBITKICK_MANIFEST.to_string(),
        MAYUR_MANIFEST.to_string(),
        no_domain_hex(),
    ] {
        let manifest = normalize_json(&json!(hex_manifest)).unwrap();
        let encoded = encode_manifest(&manifest).unwrap();
        assert_eq!(hex::encode_upper(encoded), hex_manifest.to_uppercase());
    }
}

#[test]
fn mayur_manifest_fields() {
    let manifest = normalize_json(&json!(MAYUR_MANIFEST)).unwrap();
    assert_eq!(manifest.seq, 2);
    assert_eq!(manifest.domain.as_deref(), Some("payid.mayurbhandary.com"));
    assert_eq!(manifest.master_key.to_address(), MAYUR_MASTER);
}

#[test]
fn invalid_manifests_are_rejected() {
    let invalid = [
        json!({}),
        json!({"seq": 1}),
        json!({"master_key": RABBITKICK_MASTER, "master_signature": "AA"}),
        json!({
            "master_key": RABBITKICK_MASTER,
            "master_signature": "AA",
            "seq": 1,
            "extra": true
        }),
        json!({
            "PublicKey": RABBITKICK_MASTER,
            "MasterSignature": "AA",
            "Sequence": -1
        }),
        json!({
            "PublicKey": RABBITKICK_MASTER,
            "MasterSignature": "AA",
            "Sequence": 1,
            "Domain": 5
        }),
        json!({
            "master_key": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "master_signature": "AA",
            "seq": 1
        }),
        json!({
            "master_key": RABBITKICK_MASTER,
            "master_signature": "not hex",
            "seq": 1
        }),
        json!({
            "master_key": RABBITKICK_MASTER,
            "master_signature": "AA",
            "seq": 1,
            "domain": null
        }),
        json!({
            "master_key": RABBITKICK_MASTER,
            "master_signature": "AA",
            "seq": 1,
            "ephemeral_key": null
        }),
        json!({
            "master_key": RABBITKICK_MASTER,
            "master_signature": "AA",
            "seq": 1,
            "signing_key": null
        }),
        json!({
            "master_key": RABBITKICK_MASTER,
            "master_signature": "AA",
            "seq": 1,
            "signature": null
        }),
        json!({
            "PublicKey": RABBITKICK_MASTER,
            "MasterSignature": "AA",
            "Sequence": 1,
            "Domain": null
        }),
        json!({
            "PublicKey": RABBITKICK_MASTER,
            "MasterSignature": "AA",
            "Sequence": 1,
            "SigningPubKey": null
        }),
        json!(12),
        json!("zz"),
    ];

    for manifest in invalid {
        let err = normalize_json(&manifest).unwrap_err();
        assert!(
            matches!(err, ManifestError::MalformedInput(_)),
            "{} gave {:?}",
            manifest,
            err
        );
    }
}

#[test]
fn binary_with_unknown_field_is_malformed() {
    // UInt32 field 5 sorts between Sequence and PublicKey.
    let manifest = format!(
        "{}2500000001{}",
        &RABBITKICK_MANIFEST[..10],
        &RABBITKICK_MANIFEST[10..]
    );
    let err = normalize(RawManifest::Binary(manifest)).unwrap_err();
    match err {
        ManifestError::MalformedInput(message) => {
            assert!(message.contains("unexpected field"), "{}", message)
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn binary_with_short_key_is_malformed() {
    let manifest = "240000000171020102701201AA";
    assert!(matches!(
        normalize(RawManifest::Binary(manifest.into())),
        Err(ManifestError::MalformedInput(_))
    ));
}
