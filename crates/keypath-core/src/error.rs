// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for tree normalization and path assignment

use serde_json::Value as J;
use thiserror::Error;

/// Result type alias for keypath operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while normalizing or mutating a tree
#[derive(Debug, Error)]
pub enum Error {
    /// A mapping key that cannot be re-typed as a string
    #[error("unexpected type of key in map: expected string, got {kind}: value={key}, map={map}")]
    KeyType {
        key: String,
        kind: &'static str,
        map: String,
    },

    /// The requested path conflicts with data already present in the tree
    #[error("cannot resolve `{segment}`: expected {expected}, found {found}")]
    TypeMismatch {
        segment: String,
        expected: &'static str,
        found: String,
    },

    /// An index past the largest sequence this crate will build
    #[error("index in `{segment}` exceeds the maximum of {max}")]
    IndexTooLarge { segment: String, max: usize },

    /// An empty path was handed to the mutator; callers must reject these first
    #[error("bug: unexpected length of key: 0")]
    EmptyPath,

    #[error("malformed override '{0}': expected KEY=VALUE")]
    MalformedOverride(String),
}

impl Error {
    pub(crate) fn mismatch(segment: impl Into<String>, expected: &'static str, found: &J) -> Self {
        Error::TypeMismatch {
            segment: segment.into(),
            expected,
            found: format!("{}({})", found, kind_of(found)),
        }
    }
}

/// Short name of the variant held by a tree node, for diagnostics
pub fn kind_of(v: &J) -> &'static str {
    match v {
        J::Null => "null",
        J::Bool(_) => "bool",
        J::Number(_) => "number",
        J::String(_) => "string",
        J::Array(_) => "sequence",
        J::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mismatch_names_found_value() {
        let err = Error::mismatch("a", "mapping", &json!(["x"]));
        assert_eq!(
            err.to_string(),
            r#"cannot resolve `a`: expected mapping, found ["x"](sequence)"#
        );
    }

    #[test]
    fn test_kind_of_covers_all_variants() {
        assert_eq!(kind_of(&J::Null), "null");
        assert_eq!(kind_of(&json!(true)), "bool");
        assert_eq!(kind_of(&json!(1)), "number");
        assert_eq!(kind_of(&json!("s")), "string");
        assert_eq!(kind_of(&json!([])), "sequence");
        assert_eq!(kind_of(&json!({})), "mapping");
    }
}
