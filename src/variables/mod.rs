//! Variables module
//!
//! Placeholder substitution for catalog templates: the [`VariableResolver`]
//! engine, the injected environment capability and the alias table.

pub mod aliases;
pub mod env;
pub mod substitution;
pub mod walk;

pub use aliases::AliasTable;
pub use env::{EnvLookup, MapEnv, ProcessEnv};
pub use substitution::{VarError, VariableResolver};
pub use walk::walk;
