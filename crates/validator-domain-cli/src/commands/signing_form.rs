//! Signing-form command implementation.

use validator_domain_core::{normalize_json, signing_form, Verifier};

use crate::input::read_manifest;
use crate::output::describe_check;

pub fn run(manifest: String) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_manifest(&manifest)?;
    let manifest = normalize_json(&input).map_err(|e| format!("Cannot Parse Manifest: {}", e))?;

    let verifier = Verifier::new();
    println!("signing form:        {}", hex::encode_upper(signing_form(&manifest)?));
    println!(
        "master signature:    {}",
        describe_check(verifier.verify_master_signature(&manifest))
    );
    println!(
        "ephemeral signature: {}",
        describe_check(verifier.verify_ephemeral_signature(&manifest))
    );
    Ok(())
}
