// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// This Source Code Form is "Incompatible With Secondary Licenses", as
// defined by the Mozilla Public License, v. 2.0.
//
// Copyright © 2026 the heap-core authors

//! `heap-cli`: runs a guest trace script against a freshly constructed
//! heap, tracing one line per executed operation. See [`script::run`] for
//! the script grammar.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use heap_core::{Allocator, Heap};

mod script;

/// Run a trace script against a fresh heap.
#[derive(Parser)]
#[command(name = "heap-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the trace script to execute.
    script: PathBuf,

    /// Enable verbose (debug-level) tracing.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let source = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("reading script {}", cli.script.display()))?;

    let mut heap = Heap::new();
    let mut allocator = Allocator::new();
    script::run(&mut heap, &mut allocator, &source)?;

    tracing::info!(
        regions_in_use = heap.regions_in_use(),
        "script finished"
    );
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}
