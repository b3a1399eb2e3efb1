// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only
#![allow(clippy::disallowed_methods)] // CLI commands intentionally print to stdout

//! Subcommand implementations

use crate::document::{self, Format};
use anyhow::{Context, Result};
use keypath_core::{apply_overrides, Override, Path};
use serde_json::{Map, Value as J};
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// Where the document comes from
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Input document; stdin when absent or `-`
    pub file: Option<PathBuf>,
    /// Input format (default: from the file extension, else yaml)
    #[arg(long, value_enum)]
    pub input_format: Option<Format>,
}

impl InputArgs {
    fn read(&self) -> Result<(Map<String, J>, Format)> {
        let (text, detected) = match self.file.as_deref() {
            Some(path) if path != std::path::Path::new("-") => (
                std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?,
                Format::from_path(path),
            ),
            _ => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text).context("reading stdin")?;
                (text, None)
            }
        };

        let format = self.input_format.or(detected).unwrap_or(Format::Yaml);
        tracing::debug!(?format, "decoding document");
        let tree = document::decode(&text, format)?;
        Ok((tree, format))
    }
}

/// Where the result goes
#[derive(clap::Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format (default: same as the input)
    #[arg(long, value_enum)]
    pub output_format: Option<Format>,
    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    fn write(&self, tree: &Map<String, J>, input_format: Format) -> Result<()> {
        let format = self.output_format.unwrap_or(input_format);
        let text = document::encode(tree, format)?;
        match &self.output {
            Some(path) => std::fs::write(path, text)
                .with_context(|| format!("writing {}", path.display()))?,
            None => io::stdout().write_all(text.as_bytes())?,
        }
        Ok(())
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct SetArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Override to apply, as KEY=VALUE; repeatable, applied in order
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        env = "KEYPATH_SET",
        required = true
    )]
    pub overrides: Vec<Override>,
    #[command(flatten)]
    pub output: OutputArgs,
}

impl SetArgs {
    pub fn run(self) -> Result<()> {
        let (mut tree, format) = self.input.read()?;
        apply_overrides(&mut tree, &self.overrides).context("applying overrides")?;
        tracing::info!(count = self.overrides.len(), "applied overrides");
        self.output.write(&tree, format)
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct GetArgs {
    /// Dotted key to read, e.g. `spec.containers[0].image`
    pub key: Path,
    #[command(flatten)]
    pub input: InputArgs,
}

impl GetArgs {
    pub fn run(self) -> Result<()> {
        let (tree, _) = self.input.read()?;
        let Some(value) = self.key.lookup(&tree) else {
            anyhow::bail!("Configuration key '{}' not found", self.key);
        };
        println!("{}", render(value)?);
        Ok(())
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

impl NormalizeArgs {
    pub fn run(self) -> Result<()> {
        let (tree, format) = self.input.read()?;
        self.output.write(&tree, format)
    }
}

/// Strings print raw, containers as pretty JSON
fn render(value: &J) -> Result<String> {
    Ok(match value {
        J::String(s) => s.clone(),
        J::Array(_) | J::Object(_) => serde_json::to_string_pretty(value)?,
        scalar => scalar.to_string(),
    })
}
