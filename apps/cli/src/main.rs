// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Addin-Lite command harness.
//!
//! Runs the reinforcement and duct routing commands against a scripted host
//! described by a JSON scenario, then prints the command status and every
//! host call as JSON.
//!
//! ```text
//! addin-lite beam scenarios/beam.json
//! addin-lite column scenarios/column.json
//! addin-lite reinforce scenarios/column.json
//! addin-lite route scenarios/route.json
//! ```
//!
//! Exit code 0 when the command succeeded, 1 when it was cancelled and 2 when
//! it failed.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod host;
mod scenario;

use commands::{CommandStatus, MemberCommand};
use config::HarnessConfig;

#[derive(Parser)]
#[command(name = "addin-lite")]
#[command(about = "Run add-in commands against a scripted host", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reinforce a beam
    Beam {
        /// Member scenario file
        scenario: PathBuf,
    },
    /// Reinforce a column
    Column {
        /// Member scenario file
        scenario: PathBuf,
    },
    /// Reinforce a beam or column, whichever the element is
    Reinforce {
        /// Member scenario file
        scenario: PathBuf,
    },
    /// Route ducts from an equipment outlet to two terminals
    Route {
        /// Route scenario file
        scenario: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = HarnessConfig::from_env();

    // Logs go to stderr, the report to stdout
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr);
    if config.pretty_logs {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    let report = match &cli.command {
        Commands::Beam { scenario: path } => member(MemberCommand::Beam, path)?,
        Commands::Column { scenario: path } => member(MemberCommand::Column, path)?,
        Commands::Reinforce { scenario: path } => member(MemberCommand::Reinforce, path)?,
        Commands::Route { scenario: path } => {
            tracing::info!(scenario = %path.display(), "Running route command");
            commands::route(&scenario::load(path)?)?
        }
    };

    let json = if config.pretty_output {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(match report.status {
        CommandStatus::Succeeded => ExitCode::SUCCESS,
        CommandStatus::Cancelled => ExitCode::from(1),
        CommandStatus::Failed(_) => ExitCode::from(2),
    })
}

fn member(command: MemberCommand, path: &std::path::Path) -> Result<commands::Report> {
    tracing::info!(
        command = command.name(),
        scenario = %path.display(),
        "Running reinforcement command"
    );
    commands::reinforce(command, &scenario::load(path)?)
}
