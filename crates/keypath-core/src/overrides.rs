// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `KEY=VALUE` overrides, as passed on a command line

use crate::error::{Error, Result};
use crate::path::Path;
use serde_json::{Map, Value as J};
use std::str::FromStr;

/// A single parsed `KEY=VALUE` override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    /// The key as written, before path parsing
    pub key: String,
    pub path: Path,
    pub value: String,
}

impl Override {
    pub fn new(key: &str, value: impl Into<String>) -> Result<Self> {
        let path = Path::parse(key).map_err(|_| Error::MalformedOverride(key.to_string()))?;
        Ok(Self {
            key: key.to_string(),
            path,
            value: value.into(),
        })
    }

    /// Assign this override's value into `tree`
    pub fn apply(&self, tree: &mut Map<String, J>) -> Result<()> {
        tracing::debug!(key = %self.key, value = %self.value, "applying override");
        self.path.set(tree, &self.value)
    }
}

impl FromStr for Override {
    type Err = Error;

    /// Split on the first `=`; the value is kept verbatim and may itself contain `=`
    fn from_str(s: &str) -> Result<Self> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| Error::MalformedOverride(s.to_string()))?;
        Self::new(key, value).map_err(|_| Error::MalformedOverride(s.to_string()))
    }
}

/// Apply overrides in order, stopping at the first conflict
pub fn apply_overrides(tree: &mut Map<String, J>, overrides: &[Override]) -> Result<()> {
    for o in overrides {
        o.apply(tree)?;
    }
    Ok(())
}

/// Build a fresh tree from `(key, value)` pairs
pub fn overlay(kv_pairs: &[(&str, &str)]) -> Result<Map<String, J>> {
    let mut root = Map::new();
    for (k, v) in kv_pairs {
        Override::new(k, *v)?.apply(&mut root)?;
    }
    Ok(root)
}
