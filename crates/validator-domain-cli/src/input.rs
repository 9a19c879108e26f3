//! Resolution of the MANIFEST command-line argument.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use base64::Engine;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Argument that reads the manifest from stdin.
pub const STDIN_ARG: &str = "-";

/// Failures reading a manifest argument.
#[derive(Error, Debug)]
pub enum InputError {
    /// stdin could not be read.
    #[error("cannot read stdin: {0}")]
    Stdin(#[from] io::Error),
    /// A manifest file could not be read.
    #[error("Failed to read file {path}: {source}")]
    File {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Turns the MANIFEST argument into the JSON value the pipeline accepts.
///
/// `-` reads stdin and an existing path reads that file; either way the
/// contents are JSON or a manifest string. Hex is passed through, base64 is
/// re-encoded as hex, and anything else is passed through unchanged so the
/// pipeline reports it as malformed.
pub fn read_manifest(arg: &str) -> Result<Value, InputError> {
    if arg == STDIN_ARG {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(parse_contents(&buffer));
    }

    let path = Path::new(arg);
    if path.is_file() {
        debug!(path = %path.display(), "reading manifest file");
        let contents = std::fs::read_to_string(path).map_err(|source| InputError::File {
            path: path.to_path_buf(),
            source,
        })?;
        return Ok(parse_contents(&contents));
    }

    Ok(interpret_text(arg))
}

fn parse_contents(contents: &str) -> Value {
    // Bare all-digit hex would otherwise parse as a JSON number.
    match serde_json::from_str(contents) {
        Ok(value @ (Value::Object(_) | Value::String(_))) => value,
        _ => interpret_text(contents),
    }
}

fn interpret_text(text: &str) -> Value {
    let text = text.trim();
    if is_hex(text) {
        return Value::String(text.to_string());
    }
    match base64::engine::general_purpose::STANDARD.decode(text) {
        Ok(bytes) if !bytes.is_empty() => {
            debug!(len = bytes.len(), "manifest argument is base64");
            Value::String(hex::encode_upper(bytes))
        }
        _ => Value::String(text.to_string()),
    }
}

fn is_hex(text: &str) -> bool {
    !text.is_empty() && text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn hex_is_passed_through() {
        assert_eq!(interpret_text("240000007B"), json!("240000007B"));
    }

    #[test]
    fn base64_becomes_hex() {
        assert_eq!(interpret_text("JAAAAHs="), json!("240000007B"));
    }

    #[test]
    fn other_text_is_passed_through() {
        assert_eq!(interpret_text("not a manifest!"), json!("not a manifest!"));
    }

    #[test]
    fn all_digit_hex_contents_stay_strings() {
        assert_eq!(parse_contents("2400000001\n"), json!("2400000001"));
    }

    #[test]
    fn files_may_hold_json_or_text() {
        let mut json_file = tempfile::NamedTempFile::new().unwrap();
        write!(json_file, r#"{{"seq": 1}}"#).unwrap();
        assert_eq!(
            read_manifest(json_file.path().to_str().unwrap()).unwrap(),
            json!({"seq": 1})
        );

        let mut text_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(text_file, "JAAAAHs=").unwrap();
        assert_eq!(
            read_manifest(text_file.path().to_str().unwrap()).unwrap(),
            json!("240000007B")
        );
    }
}
