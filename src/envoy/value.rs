//! Structured value tree and typed-any wrapper
//!
//! The protocol-native representation of arbitrary JSON-like data (the
//! `google.protobuf.Struct` family), used to carry opaque per-filter
//! configuration through the strongly typed route configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Type URL identifying a struct payload inside a typed-any wrapper.
pub const STRUCT_TYPE_URL: &str = "type.googleapis.com/google.protobuf.Struct";

/// A dynamically typed value node.
///
/// A closed union: every JSON-like input maps to exactly one of these
/// variants, and unrecognized shapes map to `Null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    /// All numeric input narrows to a double, per the protocol's numeric model
    Number(f64),
    String(String),
    List(Vec<Value>),
    Struct(Struct),
}

/// A keyed mapping of value nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Struct {
    pub fields: BTreeMap<String, Value>,
}

impl FromIterator<(String, Value)> for Struct {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Struct {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Typed-any wrapper around a struct payload, for consumers that need an
/// explicit type discriminator on opaque configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedStruct {
    /// Type discriminator; always [`STRUCT_TYPE_URL`] for struct payloads
    #[serde(rename = "@type")]
    pub type_url: String,

    pub value: Struct,
}

impl TypedStruct {
    /// Box a struct payload under the struct type URL.
    pub fn of(value: Struct) -> Self {
        Self {
            type_url: STRUCT_TYPE_URL.to_string(),
            value,
        }
    }
}
