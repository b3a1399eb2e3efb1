// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Recursive key normalization for decoded documents.
//!
//! Document decoders hand us trees whose mappings may be keyed by arbitrary
//! values (YAML allows `1: x`, `true: y`, even sequences as keys). Everything
//! downstream works on `serde_json::Value`, so every mapping is re-keyed by
//! strings here, and any key that is not already a string is rejected.

use crate::error::{Error, Result};
use serde_json::{Map, Value as J};
use serde_yaml::{Mapping, Value as Y};

/// A decoded tree that can be re-keyed into a string-keyed JSON tree
pub trait Untyped {
    /// Normalize this node, recursing into nested mappings and sequences
    fn normalize_node(&self) -> Result<J>;

    /// Normalize this node as a document root.
    ///
    /// A root that is not a mapping yields an empty mapping.
    fn normalize_root(&self) -> Result<Map<String, J>>;
}

/// Re-key every mapping in `input` by strings, failing on the first non-string key
pub fn normalize<T: Untyped + ?Sized>(input: &T) -> Result<Map<String, J>> {
    input.normalize_root()
}

impl Untyped for Y {
    fn normalize_node(&self) -> Result<J> {
        match self {
            Y::Mapping(m) => Ok(J::Object(normalize_mapping(m)?)),
            Y::Sequence(items) => Ok(J::Array(
                items.iter().map(Untyped::normalize_node).collect::<Result<_>>()?,
            )),
            Y::Tagged(tagged) => tagged.value.normalize_node(),
            Y::Null => Ok(J::Null),
            Y::Bool(b) => Ok(J::Bool(*b)),
            Y::Number(n) => Ok(yaml_number(n)),
            Y::String(s) => Ok(J::String(s.clone())),
        }
    }

    fn normalize_root(&self) -> Result<Map<String, J>> {
        match self {
            Y::Mapping(m) => normalize_mapping(m),
            Y::Tagged(tagged) => tagged.value.normalize_root(),
            other => {
                tracing::debug!(
                    kind = yaml_kind(other),
                    "document root is not a mapping, using an empty one"
                );
                Ok(Map::new())
            }
        }
    }
}

impl Untyped for J {
    fn normalize_node(&self) -> Result<J> {
        // JSON objects are string-keyed already
        Ok(self.clone())
    }

    fn normalize_root(&self) -> Result<Map<String, J>> {
        match self {
            J::Object(m) => Ok(m.clone()),
            other => {
                tracing::debug!(
                    kind = crate::error::kind_of(other),
                    "document root is not a mapping, using an empty one"
                );
                Ok(Map::new())
            }
        }
    }
}

impl Untyped for Map<String, J> {
    fn normalize_node(&self) -> Result<J> {
        Ok(J::Object(self.clone()))
    }

    fn normalize_root(&self) -> Result<Map<String, J>> {
        Ok(self.clone())
    }
}

fn normalize_mapping(m: &Mapping) -> Result<Map<String, J>> {
    let mut out = Map::with_capacity(m.len());
    for (k, v) in m {
        let Y::String(key) = k else {
            return Err(Error::KeyType {
                key: describe(k),
                kind: yaml_kind(k),
                map: format!("{m:?}"),
            });
        };
        out.insert(key.clone(), v.normalize_node()?);
    }
    Ok(out)
}

/// JSON has no NaN or infinity; those come out as null
fn yaml_number(n: &serde_yaml::Number) -> J {
    if let Some(u) = n.as_u64() {
        J::from(u)
    } else if let Some(i) = n.as_i64() {
        J::from(i)
    } else {
        n.as_f64()
            .and_then(serde_json::Number::from_f64)
            .map_or(J::Null, J::Number)
    }
}

/// Render a YAML node on one line for error messages
fn describe(v: &Y) -> String {
    match serde_yaml::to_string(v) {
        Ok(s) => s.trim_end().replace('\n', " "),
        Err(_) => format!("{v:?}"),
    }
}

fn yaml_kind(v: &Y) -> &'static str {
    match v {
        Y::Null => "null",
        Y::Bool(_) => "bool",
        Y::Number(n) if n.is_f64() => "float",
        Y::Number(_) => "int",
        Y::String(_) => "string",
        Y::Sequence(_) => "sequence",
        Y::Mapping(_) => "mapping",
        Y::Tagged(_) => "tagged",
    }
}
