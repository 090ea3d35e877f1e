// Copyright (c) 2024 Jan Holthuis <jan.holthuis@rub.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0. If a copy
// of the MPL was not distributed with this file, You can obtain one at
// http://mozilla.org/MPL/2.0/.
//
// SPDX-License-Identifier: MPL-2.0

//! Command line interface.

mod config;
mod import;
mod search;
mod ui;

use crate::musicbrainz::SearchFilters;
use crate::Config;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;

/// Command line Arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Show debug information.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Path to configuration file.
    #[arg(short, long, global = true, required = false)]
    config_path: Option<PathBuf>,
    /// The command to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Identify an album directory, then rename and tag its files.
    Import(import::Args),
    /// Run the release search for an album directory and print the raw response.
    Search(search::Args),
    /// Print the effective configuration.
    Config(config::Args),
}

/// Search filters shared by the `import` and `search` commands.
#[derive(clap::Args, Debug, Clone, Default)]
struct FilterArgs {
    /// Only search for releases with this medium format (e.g. `CD`).
    #[arg(long)]
    format: Option<String>,
    /// Only search for releases from this country (e.g. `US`).
    #[arg(long)]
    country: Option<String>,
}

impl FilterArgs {
    /// Combine the command line filters with the configured defaults.
    fn search_filters(&self, config: &Config) -> SearchFilters {
        SearchFilters {
            format: self
                .format
                .clone()
                .or_else(|| config.lookup.format.clone()),
            country: self
                .country
                .clone()
                .or_else(|| config.lookup.country.clone()),
        }
    }
}

impl Args {
    /// Get the desired log level, depending on the verbose flag passed on the command line.
    fn log_level_filter(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Main entry point.
///
/// # Errors
///
/// Can returns errors if the command line arguments are incorrect or the executed programs lead to
/// an error.
pub async fn main() -> crate::Result<()> {
    let args = Args::parse();

    let log_config = ConfigBuilder::new()
        .add_filter_allow_str(env!("CARGO_CRATE_NAME"))
        .build();
    if let Err(err) = TermLogger::init(
        args.log_level_filter(),
        log_config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialize logger: {err}");
    }

    let config = Config::load(args.config_path.as_deref())?;

    match args.command {
        Commands::Import(cmd_args) => import::run(&config, cmd_args).await,
        Commands::Search(cmd_args) => search::run(&config, cmd_args).await,
        Commands::Config(cmd_args) => config::run(&config, cmd_args),
    }
}
