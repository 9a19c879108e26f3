//! Verify command implementation.

use std::path::PathBuf;

use tracing::info;
use validator_domain_core::verify_validator_domain;

use crate::fetch::{FetchConfig, FileTableSource, HttpTableSource};
use crate::input::read_manifest;
use crate::output::{format_json, format_summary};

pub fn run(
    manifest: String,
    json_output: bool,
    table: Option<PathBuf>,
    config: &FetchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_manifest(&manifest)?;

    let result = match table {
        Some(path) => verify_validator_domain(&input, &FileTableSource::new(path))?,
        None => verify_validator_domain(&input, &HttpTableSource::new(config)?)?,
    };

    let report = result.report();
    if json_output {
        println!("{}", format_json(&report)?);
    } else {
        println!("{}", format_summary(&report));
    }

    match result.reason() {
        None => {
            info!(message = %report.message, "verification succeeded");
            Ok(())
        }
        Some(reason) => {
            info!(kind = reason.kind(), "verification failed");
            std::process::exit(1);
        }
    }
}
