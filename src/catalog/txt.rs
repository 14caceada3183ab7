//! Tabular text catalog format.
//!
//! The first non-empty line names the columns, separated by whitespace
//! (conventionally `service name url method headers body`). Every following
//! line is one entry whose values appear in the same column order:
//!
//! ```text
//! service name url method headers body
//! httpbin get https://httpbin.org/get GET {}
//! openai chat https://api.openai.com/v1/chat/completions POST "BEARER $!API_KEY" "{""model"": ""$!MODEL""}"
//! ```
//!
//! Values are separated by single spaces. A double quote toggles quoted mode,
//! in which spaces are kept; inside quotes, `""` is a literal quote. The bare
//! value `null` decodes to null, and any value outside the `body` column that
//! starts with `{` is decoded as JSON when it parses.

use crate::models::ApiDescriptor;
use log::trace;
use serde_json::{Map, Value};

/// Column whose text is never JSON-decoded.
const BODY_COLUMN: &str = "body";

/// Parses a whole tabular catalog into descriptors, in file order.
///
/// Empty content, or content with only a header line, yields no entries.
pub fn parse_txt(content: &str) -> Vec<ApiDescriptor> {
    parse_txt_records(content)
        .into_iter()
        .map(ApiDescriptor::from_record)
        .collect()
}

/// Parses a tabular catalog into raw column/value records.
///
/// Values past the last column are dropped. Columns with no value on a row
/// are left out of that row's record.
pub fn parse_txt_records(content: &str) -> Vec<Map<String, Value>> {
    let mut lines = content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty());

    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let keys: Vec<&str> = header.split_whitespace().collect();

    lines
        .map(|line| {
            keys.iter()
                .zip(tokenize_row(line))
                .map(|(key, raw)| (key.to_string(), decode_field(key, raw)))
                .collect()
        })
        .collect()
}

/// Splits one row into its raw field values.
pub fn tokenize_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ' ' if !quoted => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

fn decode_field(key: &str, raw: String) -> Value {
    if raw == "null" {
        return Value::Null;
    }
    if key != BODY_COLUMN && raw.starts_with('{') {
        return try_parse_json_or_keep(raw);
    }
    Value::String(raw)
}

/// Decodes `raw` as JSON, or keeps it as a plain string if it does not parse.
///
/// The fallback is intentional: a value that merely looks like JSON, such as
/// a URL template starting with `{`, stays usable as text rather than failing
/// the whole catalog load.
pub fn try_parse_json_or_keep(raw: String) -> Value {
    match serde_json::from_str(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            trace!("Keeping field as text, not valid JSON ({}): {}", e, raw);
            Value::String(raw)
        }
    }
}
