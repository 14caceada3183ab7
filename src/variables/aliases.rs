//! Variable alias table.
//!
//! An alias is a fallback name tried when a variable has no direct value in
//! either the caller overrides or the environment. Only names present as keys
//! in the table ever consult aliases.

use std::collections::HashMap;

/// The provider API-key variables that stand in for each other.
const API_KEY_GROUP: &[&str] = &[
    "API_KEY",
    "OPENAI_API_KEY",
    "OPENROUTER_API_KEY",
    "CEREBRAS_API_KEY",
];

/// Maps a canonical variable name to an ordered list of fallback names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, Vec<String>>,
}

impl AliasTable {
    /// Creates a table with no aliases.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registers `aliases` as the fallbacks for `name`, replacing any existing entry.
    pub fn insert<I, S>(&mut self, name: impl Into<String>, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(name.into(), aliases.into_iter().map(Into::into).collect());
    }

    /// Builder-style variant of [`AliasTable::insert`].
    pub fn with<I, S>(mut self, name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, aliases);
        self
    }

    /// Returns the fallback names for `name`, in lookup order.
    pub fn aliases_for(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AliasTable {
    /// The API-key group: `API_KEY` falls back through the three provider
    /// keys in order, and each provider key falls back to `API_KEY`.
    fn default() -> Self {
        let (canonical, providers) = API_KEY_GROUP.split_at(1);
        let mut table = Self::empty().with(canonical[0], providers.iter().copied());
        for provider in providers {
            table.insert(*provider, [canonical[0]]);
        }
        table
    }
}
