//! Shape-preserving substitution over nested template values.
//!
//! Template values are [`serde_json::Value`] trees. Every string leaf goes
//! through [`VariableResolver::sub`]; lists and maps are rebuilt with their
//! elements walked; numbers, booleans and null pass through unchanged. The
//! input is never modified.

use super::env::EnvLookup;
use super::substitution::{VarError, VariableResolver};
use crate::models::VariableMap;
use serde_json::{Map, Value};

impl<E: EnvLookup> VariableResolver<E> {
    /// Substitutes every string leaf of `value`, returning a new tree of the same shape.
    pub fn walk(&self, value: &Value, overrides: &VariableMap) -> Result<Value, VarError> {
        walk(value, &|s: &str| self.sub(s, overrides))
    }

    /// Substitutes `value` if it is a string; any other value is returned as-is.
    pub fn sub_value(&self, value: &Value, overrides: &VariableMap) -> Result<Value, VarError> {
        match value {
            Value::String(s) => self.sub(s, overrides).map(Value::String),
            other => Ok(other.clone()),
        }
    }
}

/// Applies `leaf` to every string in `value`, preserving the tree's shape.
pub fn walk<F, Err>(value: &Value, leaf: &F) -> Result<Value, Err>
where
    F: Fn(&str) -> Result<String, Err>,
{
    match value {
        Value::String(s) => leaf(s).map(Value::String),
        Value::Array(items) => items
            .iter()
            .map(|item| walk(item, leaf))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(entries) => {
            let mut walked = Map::with_capacity(entries.len());
            for (key, item) in entries {
                walked.insert(key.clone(), walk(item, leaf)?);
            }
            Ok(Value::Object(walked))
        }
        scalar => Ok(scalar.clone()),
    }
}
