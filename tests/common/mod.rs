#![allow(dead_code)]

use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;

/// Writes `doc` to a temporary JSON file that lives as long as the handle.
pub fn json_file(doc: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{doc}").unwrap();
    file
}

pub fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is not a JSON document")
}
