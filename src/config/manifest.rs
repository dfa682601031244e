//! Raw manifest parsing: a YAML sequence of untyped mappings.
use serde_yaml::{Mapping, Value};

/// A single manifest record before classification.
pub type ManifestRecord = Mapping;

/// Parse manifest text into an ordered list of records.
///
/// An empty document or a YAML `null` yields an empty list.
///
/// # Errors
///
/// Returns an error if the text is not YAML, or if the top level is not a
/// sequence of mappings.
pub fn parse(content: &str) -> Result<Vec<ManifestRecord>, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Option<Vec<ManifestRecord>> = serde_yaml::from_str(content)?;
    Ok(records.unwrap_or_default())
}

/// Compact single-line rendering of a record for log output.
///
/// # Examples
///
/// ```
/// use brewsync::config::manifest::{describe, parse};
///
/// let records = parse("- homebrew_pip:\n  version: 2\n").unwrap();
/// assert_eq!(describe(&records[0]), "{homebrew_pip: ~, version: 2}");
/// ```
#[must_use]
pub fn describe(record: &ManifestRecord) -> String {
    let fields: Vec<String> = record
        .iter()
        .map(|(k, v)| format!("{}: {}", scalar(k), scalar(v)))
        .collect();
    format!("{{{}}}", fields.join(", "))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "~".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(scalar).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(m) => describe(m),
        Value::Tagged(t) => format!("{} {}", t.tag, scalar(&t.value)),
    }
}

/// The record's `name`, if present and a string.
#[must_use]
pub fn record_name(record: &ManifestRecord) -> Option<&str> {
    record.get("name").and_then(Value::as_str)
}
