//! Schema module
//!
//! Validates raw CMDB payloads before any field is read.
//!
//! # Supported keywords
//!
//! - `type` (single type or list of types)
//! - `properties`, `required`, `additionalProperties`
//! - `items`, `minItems`
//! - `enum`, `minLength`

mod types;
mod validator;

pub use types::{JsonType, JsonTypeOrArray, SchemaNode};
pub use validator::{Schema, BUNDLED_SCHEMA};
