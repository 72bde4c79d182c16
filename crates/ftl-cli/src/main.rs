// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! FTL parser command-line interface.
//!
//! Parses each file argument, prints caret-annotated diagnostics for any
//! parse errors, and exits non-zero if any file failed to read or parse.
//! With `--json`, the canonical AST JSON of each file is printed to stdout
//! (junk entries included), which makes the command usable as a front end
//! for downstream tooling even on partially broken resources.

use std::fs;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{CommandFactory, Parser};
use ftl_core::{json, syntax};
use miette::{IntoDiagnostic, Result};
use tracing::debug;

/// Parse Fluent (FTL) localization resources and report syntax errors
#[derive(Debug, Parser)]
#[command(name = "ftl")]
#[command(version, about, long_about = None)]
struct Cli {
    /// FTL files to parse
    files: Vec<Utf8PathBuf>,

    /// Print the canonical AST JSON for each file
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize tracing subscriber only if RUST_LOG is explicitly set,
    // keeping stderr clean for diagnostics otherwise.
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();
    }

    let cli = Cli::parse();

    if cli.files.is_empty() {
        Cli::command().print_help().into_diagnostic()?;
        return Ok(ExitCode::FAILURE);
    }

    let mut failed = false;
    for file in &cli.files {
        debug!(%file, "parsing");

        let input = match fs::read(file) {
            Ok(input) => input,
            Err(error) => {
                eprintln!("read {file}: {error}");
                failed = true;
                continue;
            }
        };

        let (resource, errors) = syntax::parse(&input);

        if let Some(errors) = errors {
            debug!(%file, count = errors.len(), "parse errors");
            eprint!("parse {file}:\n{}", errors.verbose());
            failed = true;
        }

        if cli.json {
            let rendered = json::to_string(&resource).into_diagnostic()?;
            print!("{rendered}");
        }
    }

    if failed {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
