// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Path segments and the navigation each one performs on a mapping.
//!
//! A segment is either a plain key (`image`) or a key with an index into a
//! sequence stored at that key (`ports[1]`). The kind is decided once, when
//! the segment is parsed.

use crate::error::{Error, Result};
use serde_json::{Map, Value as J};
use std::fmt::{self, Write as _};

/// One step of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Plain mapping key
    Key(String),
    /// Element `index` of the sequence stored under `key`
    Indexed { key: String, index: usize },
}

impl Segment {
    /// Interpret a raw segment string.
    ///
    /// `name[3]` becomes [`Segment::Indexed`]. Anything that does not scan as
    /// a token followed by a non-negative integer is kept verbatim as a plain
    /// key, brackets included.
    pub fn parse(raw: &str) -> Self {
        match scan_indexed(raw) {
            Some((key, index)) => Segment::Indexed { key, index },
            None => {
                if raw.contains(['[', ']']) {
                    tracing::debug!(
                        segment = raw,
                        "bracketed segment is not key[index], using it as a plain key"
                    );
                }
                Segment::Key(raw.to_string())
            }
        }
    }

    /// The mapping key this segment addresses
    pub fn key(&self) -> &str {
        match self {
            Segment::Key(key) | Segment::Indexed { key, .. } => key,
        }
    }

    /// Resolve this segment to a mapping inside `map`, creating containers on demand.
    ///
    /// Fails when something other than a mapping (or, for indexed segments,
    /// a sequence holding a mapping) is already stored there.
    pub fn resolve_map<'a>(&self, map: &'a mut Map<String, J>) -> Result<&'a mut Map<String, J>> {
        match self {
            Segment::Key(key) => {
                let slot = map.entry(key.as_str()).or_insert_with(|| {
                    tracing::trace!(key = key.as_str(), "creating mapping");
                    J::Object(Map::new())
                });
                match slot {
                    J::Object(inner) => Ok(inner),
                    other => Err(Error::mismatch(key.as_str(), "mapping", other)),
                }
            }
            Segment::Indexed { key, index } => {
                let items = resolve_sequence(key, *index, map)?;
                let slot = &mut items[*index];
                if slot.is_null() {
                    tracing::trace!(key = key.as_str(), index, "creating mapping in sequence");
                    *slot = J::Object(Map::new());
                }
                match slot {
                    J::Object(inner) => Ok(inner),
                    other => Err(Error::mismatch(self.to_string(), "mapping", other)),
                }
            }
        }
    }

    /// Write a string scalar at this segment, replacing whatever was there
    pub fn assign(&self, map: &mut Map<String, J>, value: &str) -> Result<()> {
        match self {
            Segment::Key(key) => {
                map.insert(key.clone(), J::String(value.to_string()));
            }
            Segment::Indexed { key, index } => {
                resolve_sequence(key, *index, map)?[*index] = J::String(value.to_string());
            }
        }
        Ok(())
    }

    /// Read the node at this segment without touching the tree
    pub fn get<'a>(&self, map: &'a Map<String, J>) -> Option<&'a J> {
        match self {
            Segment::Key(key) => map.get(key),
            Segment::Indexed { key, index } => {
                map.get(key)?.as_array()?.get(*index).filter(|v| !v.is_null())
            }
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write_escaped(f, key),
            Segment::Indexed { key, index } => {
                write_escaped(f, key)?;
                write!(f, "[{index}]")
            }
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, key: &str) -> fmt::Result {
    for c in key.chars() {
        if c == '.' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    Ok(())
}

/// Largest index a segment may address; growing past it is refused
pub const MAX_INDEX: usize = 1 << 16;

/// Fetch the sequence stored at `key`, creating or growing it so `index` is in bounds
fn resolve_sequence<'a>(
    key: &str,
    index: usize,
    map: &'a mut Map<String, J>,
) -> Result<&'a mut Vec<J>> {
    let len = index
        .checked_add(1)
        .filter(|_| index <= MAX_INDEX)
        .ok_or_else(|| Error::IndexTooLarge {
            segment: format!("{key}[{index}]"),
            max: MAX_INDEX,
        })?;

    let slot = map.entry(key).or_insert_with(|| {
        tracing::trace!(key, len, "creating sequence");
        J::Array(vec![J::Null; len])
    });
    match slot {
        J::Array(items) => {
            if items.len() < len {
                tracing::trace!(key, from = items.len(), to = len, "growing sequence");
                items.resize(len, J::Null);
            }
            Ok(items)
        }
        other => Err(Error::mismatch(key, "sequence", other)),
    }
}

/// Scan `raw` as `<token> <integer>` once brackets are blanked out.
///
/// Only the first two fields matter; trailing input is ignored, so
/// `a[1][2]` addresses `a[1]`. The index must fit in an `i64`; anything
/// larger does not scan.
fn scan_indexed(raw: &str) -> Option<(String, usize)> {
    let blanked: String = raw
        .chars()
        .map(|c| if c == '[' || c == ']' { ' ' } else { c })
        .collect();

    let rest = blanked.trim_start();
    let token_end = rest.find(char::is_whitespace)?;
    let (token, tail) = rest.split_at(token_end);

    let tail = tail.trim_start();
    let digits_start = usize::from(tail.starts_with('+'));
    let digits_end = tail[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(tail.len(), |i| digits_start + i);
    let index = tail[..digits_end].parse::<i64>().ok()?;
    let index = usize::try_from(index).ok()?;

    Some((token.to_string(), index))
}
