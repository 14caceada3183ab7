//! Catalog entry data model.
//!
//! An [`ApiDescriptor`] is one named, templated API definition as loaded from
//! a catalog file, before any variable has been resolved.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved prefix of the bearer-token header shorthand.
pub const BEARER_PREFIX: &str = "BEARER ";

/// One catalog entry.
///
/// Identity is `(service, name)`. Catalogs may hold duplicates; lookups
/// return the first match in load order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDescriptor {
    /// Service identifier (first segment of `service.name`).
    pub service: String,

    /// Endpoint name within the service.
    pub name: String,

    /// URL template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// HTTP verb, e.g. `GET`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Header template: either a `"BEARER <expr>"` string or a nested map of
    /// template values. `Null` when the entry defines no headers.
    #[serde(default)]
    pub headers: Value,

    /// Body template, typically JSON-shaped text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Any other fields of the entry, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiDescriptor {
    /// Creates a descriptor with only its identity set.
    pub fn new(service: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            name: name.into(),
            url: None,
            method: None,
            headers: Value::Null,
            body: None,
            extra: Map::new(),
        }
    }

    /// Builds a descriptor from a loose field record.
    ///
    /// `service` and `name` become empty strings when absent. String fields
    /// that hold a non-string value are rendered as JSON text; `null` counts
    /// as absent. Unrecognised fields are kept in [`ApiDescriptor::extra`].
    pub fn from_record(mut record: Map<String, Value>) -> Self {
        let mut descriptor = Self::new(
            take_text(&mut record, "service").unwrap_or_default(),
            take_text(&mut record, "name").unwrap_or_default(),
        );
        descriptor.url = take_text(&mut record, "url");
        descriptor.method = take_text(&mut record, "method");
        descriptor.headers = record.remove("headers").unwrap_or(Value::Null);
        descriptor.body = take_text(&mut record, "body");
        descriptor.extra = record;
        descriptor
    }

    /// The dotted `service.name` identifier.
    pub fn id(&self) -> String {
        format!("{}.{}", self.service, self.name)
    }

    /// Returns true if this entry is identified by `(service, name)`.
    pub fn matches(&self, service: &str, name: &str) -> bool {
        self.service == service && self.name == name
    }

    /// Returns the bearer expression if the headers use the shorthand form.
    ///
    /// The expression is the text after `"BEARER "`, trimmed.
    pub fn bearer_expression(&self) -> Option<&str> {
        self.headers
            .as_str()
            .and_then(|h| h.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
    }
}

fn take_text(record: &mut Map<String, Value>, key: &str) -> Option<String> {
    match record.remove(key)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
