//! Data models for catalog entries, resolved requests and responses.

pub mod descriptor;
pub mod request;
pub mod response;

pub use descriptor::{ApiDescriptor, BEARER_PREFIX};
pub use request::{RequestDescriptor, DEFAULT_METHOD};
pub use response::ApiResponse;

use std::collections::HashMap;

/// Caller-supplied variable values; these win over the environment.
pub type VariableMap = HashMap<String, String>;
