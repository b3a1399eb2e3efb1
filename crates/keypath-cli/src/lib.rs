// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

use clap::Subcommand;
use keypath_logging::CliLoggingArgs;

pub use clap::Parser;

pub mod commands;
pub mod document;

#[derive(clap::Parser)]
#[command(
    name = "keypath",
    about = "Override values in configuration documents by dotted path",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub logging: CliLoggingArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply KEY=VALUE overrides and print the resulting document
    Set(commands::SetArgs),
    /// Print the value stored at a dotted key
    Get(commands::GetArgs),
    /// Re-key every mapping with strings and re-encode the document
    Normalize(commands::NormalizeArgs),
}

impl Commands {
    pub fn run(self) -> anyhow::Result<()> {
        match self {
            Commands::Set(args) => args.run(),
            Commands::Get(args) => args.run(),
            Commands::Normalize(args) => args.run(),
        }
    }
}
