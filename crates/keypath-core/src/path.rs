// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Dotted path parsing

use crate::error::{Error, Result};
use crate::segment::Segment;
use serde_json::{Map, Value as J};
use std::fmt;
use std::str::FromStr;

/// Split a dotted key into raw segments.
///
/// A backslash makes the next character literal and is itself dropped, so
/// `a\.b.c` yields `["a.b", "c"]`. A trailing empty segment is dropped; an
/// empty input yields no segments at all.
pub fn parse_path(raw: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut part = String::new();
    let mut escaped = false;

    for c in raw.chars() {
        if !escaped && c == '\\' {
            escaped = true;
            continue;
        }
        if c == '.' && !escaped {
            segments.push(std::mem::take(&mut part));
        } else {
            part.push(c);
        }
        escaped = false;
    }

    if !part.is_empty() {
        segments.push(part);
    }
    segments
}

/// A non-empty sequence of parsed segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Parse a dotted key such as `spec.containers[0].image`
    pub fn parse(raw: &str) -> Result<Self> {
        Self::from_segments(parse_path(raw))
    }

    /// Build a path from raw segment strings, deciding each segment's kind up front
    pub fn from_segments<I, S>(raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments: Vec<Segment> =
            raw.into_iter().map(|s| Segment::parse(s.as_ref())).collect();
        if segments.is_empty() {
            return Err(Error::EmptyPath);
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Find the node at this path; holes and shape mismatches read as absent
    pub fn lookup<'a>(&self, tree: &'a Map<String, J>) -> Option<&'a J> {
        let (last, parents) = self.segments.split_last()?;
        let mut cursor = tree;
        for segment in parents {
            cursor = segment.get(cursor)?.as_object()?;
        }
        last.get(cursor)
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Look up a dotted key in `tree`
pub fn get<'a>(tree: &'a Map<String, J>, dotted: &str) -> Option<&'a J> {
    Path::parse(dotted).ok()?.lookup(tree)
}
