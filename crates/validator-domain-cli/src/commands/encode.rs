//! Encode command implementation.

use base64::Engine;
use validator_domain_core::{encode_manifest, normalize_json};

use crate::input::read_manifest;

pub fn run(manifest: String, base64_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_manifest(&manifest)?;
    let manifest = normalize_json(&input).map_err(|e| format!("Cannot Parse Manifest: {}", e))?;
    let bytes = encode_manifest(&manifest)?;

    if base64_output {
        println!("{}", base64::engine::general_purpose::STANDARD.encode(bytes));
    } else {
        println!("{}", hex::encode_upper(bytes));
    }
    Ok(())
}
