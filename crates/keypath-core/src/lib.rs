// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Key normalization and dotted-path assignment for untyped configuration trees.
//!
//! Decoded documents (YAML, JSON, TOML) are first re-keyed so every mapping
//! uses string keys ([`normalize`]), then individual values are overridden by
//! dotted paths such as `spec.containers[0].image` ([`Path`], [`set`]).
//! All operations work on `serde_json::Value` trees and mutate them in place.

pub mod error;
pub mod mutate;
pub mod normalize;
pub mod overrides;
pub mod path;
pub mod segment;

pub use error::{Error, Result};
pub use mutate::set;
pub use normalize::{normalize, Untyped};
pub use overrides::{apply_overrides, overlay, Override};
pub use path::{get, parse_path, Path};
pub use segment::Segment;
