//! Conversion of provider records into plain JSON documents.

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Anything that can be turned into a standalone JSON document.
///
/// Profiles are stored in the session as documents rather than as live
/// values, and views pretty-print documents.
pub trait ToDocument {
    fn to_document(&self) -> serde_json::Result<Value>;
}

impl<T: Serialize + ?Sized> ToDocument for T {
    fn to_document(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

/// Pretty-print a document with sorted keys and four-space indentation.
pub fn to_pretty_json<T: ToDocument + ?Sized>(value: &T) -> serde_json::Result<String> {
    let document = sort_keys(value.to_document()?);

    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(serde_json::Error::custom)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
