//! Normalize command implementation.

use validator_domain_core::normalize_json;

use crate::input::read_manifest;
use crate::output::format_json;

pub fn run(manifest: String) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_manifest(&manifest)?;
    let manifest = normalize_json(&input).map_err(|e| format!("Cannot Parse Manifest: {}", e))?;
    println!("{}", format_json(&manifest)?);
    Ok(())
}
