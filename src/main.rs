//! spacehogs - Find the files and directories eating your disk space
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use spacehogs::config::{CliArgs, ScanConfig};
use spacehogs::report::{write_entries, write_excluded_root, write_header};
use spacehogs::walker::Scanner;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("error:").for_stderr().red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments; usage errors exit here with clap's diagnostic
    let args = CliArgs::parse();

    setup_logging(args.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(root) = args.excluded_root() {
        info!(root = %root.display(), "Root is excluded, skipping scan");
        write_excluded_root(&mut out, &root).context("Failed to write output")?;
        return Ok(());
    }

    let config = ScanConfig::from_args(args)?;
    config.validate_root()?;

    write_header(&mut out, &config).context("Failed to write output")?;
    out.flush().context("Failed to write output")?;

    let report = Scanner::new(&config).scan();

    write_entries(&mut out, &report.entries).context("Failed to write output")?;

    if report.stats.errors > 0 {
        info!(errors = report.stats.errors, "Scan completed with errors");
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("spacehogs=debug,warn")
    } else {
        EnvFilter::new("spacehogs=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .init();
}
