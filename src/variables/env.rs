//! Environment lookup capability for variable resolution.
//!
//! Substitution never reads `std::env` directly. Callers hand the resolver an
//! [`EnvLookup`] implementation so resolution stays deterministic in tests:
//! [`ProcessEnv`] reads the real process environment, [`MapEnv`] serves a
//! fixed snapshot.

use std::collections::HashMap;

/// A read-only source of environment variables.
pub trait EnvLookup {
    /// Returns the value of `name`, or `None` if it is not set.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads variables from the current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        // Non-unicode values are treated as unset
        std::env::var(name).ok()
    }
}

/// A fixed environment snapshot backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable, returning `self` for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Sets a variable in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }
}

impl From<HashMap<String, String>> for MapEnv {
    fn from(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }
}

impl EnvLookup for MapEnv {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl<E: EnvLookup + ?Sized> EnvLookup for &E {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}
