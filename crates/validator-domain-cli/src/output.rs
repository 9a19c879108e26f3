//! Output formatting utilities.

use serde::Serialize;
use validator_domain_core::{ManifestError, ReportStatus, VerificationReport};

/// Formats a value as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// One-line summary of a report.
pub fn format_summary(report: &VerificationReport) -> String {
    let status = match report.status {
        ReportStatus::Success => "OK",
        ReportStatus::Error => "FAILED",
    };
    match &report.manifest {
        Some(manifest) => format!(
            "{:<7} {} (master key {}, seq {})",
            status, report.message, manifest.master_key, manifest.seq
        ),
        None => format!("{:<7} {}", status, report.message),
    }
}

/// Describes the outcome of a signature check.
pub fn describe_check(check: Result<bool, ManifestError>) -> String {
    match check {
        Ok(true) => "valid".to_string(),
        Ok(false) => "invalid".to_string(),
        Err(ManifestError::UnsupportedKeyType(key_type)) => {
            format!("not checked ({:?} keys are not supported)", key_type)
        }
        Err(e) => format!("not checked ({})", e),
    }
}
