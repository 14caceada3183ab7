//! Structured (TOML) catalog format.
//!
//! Entries live under the `apis` table, keyed by a quoted dotted identifier:
//!
//! ```toml
//! [apis."openai.chat"]
//! url = "https://api.openai.com/v1/chat/completions"
//! method = "POST"
//! headers = "BEARER $!API_KEY"
//! body = '{"model": "$!MODEL"}'
//! ```
//!
//! The key is split on `.`: segment 0 is the service, segment 1 the name, and
//! any further segments are ignored. The entry's own fields are merged on top.

use crate::models::ApiDescriptor;
use serde_json::{Map, Number, Value};

/// Table holding the catalog entries.
const APIS_TABLE: &str = "apis";

/// Parses TOML catalog text into descriptors, in document order.
///
/// A document without an `apis` table yields no entries. Entries whose value
/// is not a table contribute only their identity.
pub fn parse_toml_catalog(content: &str) -> Result<Vec<ApiDescriptor>, toml::de::Error> {
    let document: toml::Table = toml::from_str(content)?;

    let Some(toml::Value::Table(apis)) = document.get(APIS_TABLE) else {
        return Ok(Vec::new());
    };

    Ok(apis
        .iter()
        .map(|(id, entry)| {
            let mut segments = id.split('.');
            let mut record = Map::new();
            record.insert(
                "service".to_string(),
                Value::String(segments.next().unwrap_or_default().to_string()),
            );
            if let Some(name) = segments.next() {
                record.insert("name".to_string(), Value::String(name.to_string()));
            }
            if let Value::Object(fields) = toml_to_json(entry) {
                record.extend(fields);
            }
            ApiDescriptor::from_record(record)
        })
        .collect())
}

/// Converts a TOML value into the equivalent template value.
///
/// Datetimes become their RFC 3339 text; non-finite floats become null.
pub fn toml_to_json(value: &toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Integer(i) => Value::Number((*i).into()),
        toml::Value::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .iter()
                .map(|(k, v)| (k.clone(), toml_to_json(v)))
                .collect(),
        ),
    }
}
