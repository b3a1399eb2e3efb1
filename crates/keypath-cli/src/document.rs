// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Document decoding and encoding around the normalized tree

use anyhow::{Context, Result};
use keypath_core::normalize;
use serde_json::{Map, Value as J};
use std::path::Path;

/// Serialization format of a document
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }
}

/// Decode `text` and normalize it into a string-keyed tree
pub fn decode(text: &str, format: Format) -> Result<Map<String, J>> {
    let tree = match format {
        Format::Yaml => {
            let doc: serde_yaml::Value = serde_yaml::from_str(text).context("parsing YAML")?;
            normalize(&doc)?
        }
        Format::Json => {
            let doc: J = serde_json::from_str(text).context("parsing JSON")?;
            normalize(&doc)?
        }
        Format::Toml => {
            let doc: toml::Value = text.parse().context("parsing TOML")?;
            normalize(&toml_to_json(doc))?
        }
    };
    Ok(tree)
}

/// Convert TOML to JSON; datetimes become their RFC 3339 text
fn toml_to_json(t: toml::Value) -> J {
    match t {
        toml::Value::String(s) => J::String(s),
        toml::Value::Integer(i) => J::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(J::Null, J::Number),
        toml::Value::Boolean(b) => J::Bool(b),
        toml::Value::Datetime(dt) => J::String(dt.to_string()),
        toml::Value::Array(items) => J::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => J::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Encode a tree; the output always ends with a newline
pub fn encode(tree: &Map<String, J>, format: Format) -> Result<String> {
    let mut text = match format {
        Format::Yaml => serde_yaml::to_string(tree).context("encoding YAML")?,
        Format::Json => serde_json::to_string_pretty(tree).context("encoding JSON")?,
        Format::Toml => toml::to_string_pretty(tree)
            .context("encoding TOML (TOML has no null, so sequence holes cannot be written)")?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}
