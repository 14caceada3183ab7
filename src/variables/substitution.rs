//! Variable substitution engine.
//!
//! Replaces placeholders in a template string with values taken from the
//! caller's overrides, then the environment, then the alias table:
//!
//! - `$$` emits a literal `$`
//! - `$NAME` substitutes the value, or the empty string if unresolved
//! - `$!NAME` substitutes the value, or fails with [`VarError::Required`]
//!
//! `NAME` matches `[A-Za-z_][A-Za-z0-9_]*`. Matches are scanned left to right
//! and never overlap, so `$$$NAME` is a literal dollar followed by `$NAME`.
//! Substituted values are not scanned again.

use super::aliases::AliasTable;
use super::env::{EnvLookup, ProcessEnv};
use crate::models::VariableMap;
use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Cached placeholder pattern. Group 1 is the required marker, group 2 the name;
/// a match with no group 2 is the `$$` escape.
static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\$|\$(!?)([A-Za-z_][A-Za-z0-9_]*)")
        .expect("Failed to compile placeholder regex")
});

/// Errors that can occur during variable resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarError {
    /// A `$!NAME` placeholder had no value in any source
    #[error("Variable {0} is required")]
    Required(String),
}

impl VarError {
    /// Name of the variable that failed to resolve.
    pub fn variable(&self) -> &str {
        match self {
            VarError::Required(name) => name,
        }
    }
}

/// Resolves placeholders against caller overrides, an injected environment
/// and an alias table.
#[derive(Debug, Clone)]
pub struct VariableResolver<E> {
    env: E,
    aliases: AliasTable,
}

impl VariableResolver<ProcessEnv> {
    /// A resolver over the process environment with the default alias table.
    pub fn from_process_env() -> Self {
        Self::new(ProcessEnv, AliasTable::default())
    }
}

impl<E: EnvLookup> VariableResolver<E> {
    pub fn new(env: E, aliases: AliasTable) -> Self {
        Self { env, aliases }
    }

    /// The environment this resolver reads from.
    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Looks `name` up in the overrides, then the environment.
    pub fn lookup_direct(&self, name: &str, overrides: &VariableMap) -> Option<String> {
        overrides
            .get(name)
            .cloned()
            .or_else(|| self.env.get(name))
    }

    /// Full lookup: direct first, then each alias of `name` in order.
    ///
    /// Each alias is tried against the overrides and then the environment;
    /// the first defined value wins.
    pub fn lookup(&self, name: &str, overrides: &VariableMap) -> Option<String> {
        if let Some(value) = self.lookup_direct(name, overrides) {
            return Some(value);
        }

        let aliases = self.aliases.aliases_for(name)?;
        let found = aliases
            .iter()
            .find_map(|alias| self.lookup_direct(alias, overrides));
        if found.is_some() {
            trace!("Resolved variable {} through an alias", name);
        }
        found
    }

    /// Substitutes every placeholder in `template`.
    ///
    /// # Errors
    ///
    /// Returns [`VarError::Required`] for the first `$!NAME` placeholder that
    /// does not resolve, wherever it appears in the template.
    ///
    /// # Examples
    ///
    /// ```
    /// use apicli::variables::{AliasTable, MapEnv, VariableResolver};
    /// use std::collections::HashMap;
    ///
    /// let resolver = VariableResolver::new(MapEnv::new(), AliasTable::default());
    /// let mut vars = HashMap::new();
    /// vars.insert("HOST".to_string(), "example.com".to_string());
    ///
    /// let url = resolver.sub("https://$HOST/$$price", &vars).unwrap();
    /// assert_eq!(url, "https://example.com/$price");
    /// ```
    pub fn sub(&self, template: &str, overrides: &VariableMap) -> Result<String, VarError> {
        // Fast path: no dollar sign means no placeholders
        if !template.contains('$') {
            return Ok(template.to_string());
        }

        let mut result = String::with_capacity(template.len());
        let mut last_match_end = 0;

        for cap in PLACEHOLDER_REGEX.captures_iter(template) {
            let Some(full_match) = cap.get(0) else {
                continue;
            };
            result.push_str(&template[last_match_end..full_match.start()]);
            last_match_end = full_match.end();

            let Some(name) = cap.get(2).map(|m| m.as_str()) else {
                result.push('$');
                continue;
            };
            let required = cap.get(1).is_some_and(|m| !m.as_str().is_empty());

            match self.lookup(name, overrides) {
                Some(value) => result.push_str(&value),
                None if required => return Err(VarError::Required(name.to_string())),
                None => {}
            }
        }

        result.push_str(&template[last_match_end..]);
        Ok(result)
    }
}
