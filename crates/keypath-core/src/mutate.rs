// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Path-based assignment into a tree

use crate::error::{Error, Result};
use crate::path::Path;
use serde_json::{Map, Value as J};

impl Path {
    /// Assign `value` at this path, creating intermediate mappings and sequences.
    ///
    /// Sibling data is preserved. There is no rollback: containers created
    /// before a conflicting segment is reached stay in the tree.
    pub fn set(&self, tree: &mut Map<String, J>, value: &str) -> Result<()> {
        let (last, parents) = self.segments().split_last().ok_or(Error::EmptyPath)?;

        let mut cursor = tree;
        for segment in parents {
            cursor = segment.resolve_map(cursor)?;
        }
        last.assign(cursor, value)?;

        tracing::trace!(path = %self, "assigned value");
        Ok(())
    }
}

/// Assign `value` at the path given by raw `segments`.
///
/// An empty `segments` slice is a caller bug and is reported as
/// [`Error::EmptyPath`] before the tree is touched.
pub fn set<S: AsRef<str>>(tree: &mut Map<String, J>, segments: &[S], value: &str) -> Result<()> {
    Path::from_segments(segments)?.set(tree, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: J) -> Map<String, J> {
        match v {
            J::Object(m) => m,
            other => panic!("not a mapping: {other}"),
        }
    }

    #[test]
    fn test_set_creates_nested_mappings() {
        let mut tree = Map::new();
        set(&mut tree, &["a", "b"], "v").unwrap();
        assert_eq!(J::Object(tree), json!({"a": {"b": "v"}}));
    }

    #[test]
    fn test_set_indexed_leaves_holes() {
        let mut tree = Map::new();
        set(&mut tree, &["list[2]"], "v").unwrap();
        assert_eq!(J::Object(tree), json!({"list": [null, null, "v"]}));
    }

    #[test]
    fn test_set_preserves_siblings() {
        let mut tree = Map::new();
        set(&mut tree, &["a", "b"], "v1").unwrap();
        set(&mut tree, &["a", "c"], "v2").unwrap();
        assert_eq!(J::Object(tree), json!({"a": {"b": "v1", "c": "v2"}}));
    }

    #[test]
    fn test_set_through_sequence_as_mapping_fails() {
        let mut tree = Map::new();
        set(&mut tree, &["a[0]"], "v").unwrap();

        let err = set(&mut tree, &["a", "b"], "w").unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: "mapping",
                ..
            }
        ));
        assert_eq!(J::Object(tree), json!({"a": ["v"]}));
    }

    #[test]
    fn test_set_grows_existing_sequence() {
        let mut tree = obj(json!({"a": ["x"]}));
        set(&mut tree, &["a[2]"], "y").unwrap();
        assert_eq!(J::Object(tree), json!({"a": ["x", null, "y"]}));
    }

    #[test]
    fn test_set_through_indexed_mappings() {
        let mut tree = obj(json!({"spec": {"containers": [{"name": "app", "image": "old"}]}}));
        set(&mut tree, &["spec", "containers[0]", "image"], "new").unwrap();
        set(&mut tree, &["spec", "containers[1]", "name"], "sidecar").unwrap();
        assert_eq!(
            J::Object(tree),
            json!({"spec": {"containers": [
                {"name": "app", "image": "new"},
                {"name": "sidecar"}
            ]}})
        );
    }

    #[test]
    fn test_set_empty_path_is_rejected() {
        let mut tree = obj(json!({"keep": 1}));
        let empty: [&str; 0] = [];
        assert!(matches!(set(&mut tree, &empty, "v"), Err(Error::EmptyPath)));
        assert_eq!(J::Object(tree), json!({"keep": 1}));
    }

    #[test]
    fn test_conflict_leaves_existing_data_intact() {
        let mut tree = obj(json!({"a": {"b": "leaf", "c": [1]}}));
        let before = tree.clone();

        assert!(set(&mut tree, &["a", "b", "x"], "v").is_err());
        assert!(set(&mut tree, &["a", "c", "x"], "v").is_err());
        assert!(set(&mut tree, &["a", "b[0]"], "v").is_err());
        assert_eq!(tree, before);
    }

    #[test]
    fn test_oversized_indices_never_panic() {
        let mut tree = Map::new();

        // does not fit an i64, so it is an ordinary key
        set(&mut tree, &["a[18446744073709551615]"], "v").unwrap();
        assert_eq!(J::Object(tree.clone()), json!({"a[18446744073709551615]": "v"}));

        let err = set(&mut tree, &["b[10000000000000]"], "v").unwrap_err();
        assert_eq!(
            err.to_string(),
            "index in `b[10000000000000]` exceeds the maximum of 65536"
        );
        let err = set(&mut tree, &["c[9223372036854775807]", "d"], "v").unwrap_err();
        assert!(matches!(err, Error::IndexTooLarge { .. }));
        assert_eq!(J::Object(tree), json!({"a[18446744073709551615]": "v"}));
    }
}
