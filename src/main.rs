use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use git_testament::{git_testament, render_testament};
use tracing::error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use access_operators::fastq_to_bam::command::{self as fastq_to_bam, FastqToBamArgs};

git_testament!(TESTAMENT);

//===============//
// Command setup //
//===============//

/// Generates workflow inputs from sequencing metadata exports.
#[derive(Parser)]
#[command(name = "access-operators", propagate_version = true)]
struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    subcommand: Subcommands,

    /// Only errors are printed to the stderr stream.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// All available information, including debug information, is printed to
    /// stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write log lines to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// All possible subcommands for `access-operators`.
#[derive(Subcommand)]
enum Subcommands {
    /// Generates the inputs for the `fastq_to_bam` workflow.
    FastqToBam(FastqToBamArgs),
}

//=========//
// Logging //
//=========//

/// Installs the global subscriber: stderr at the requested level, plus an
/// uncolored copy of every line in the log file when one is given. If the log
/// file can't be created, logging still goes to stderr and the error is
/// returned.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let mut level = tracing::Level::INFO;
    if cli.quiet {
        level = tracing::Level::ERROR;
    } else if cli.verbose {
        level = tracing::Level::DEBUG;
    }

    let (file, result): (Option<File>, anyhow::Result<()>) = match &cli.log_file {
        Some(path) => match File::create(path) {
            Ok(file) => (Some(file), Ok(())),
            Err(err) => (
                None,
                Err(err).with_context(|| format!("creating log file {}", path.display())),
            ),
        },
        None => (None, Ok(())),
    };

    let file_layer = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    let _ = tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();

    result
}

fn run() -> anyhow::Result<()> {
    let version = render_testament!(TESTAMENT);
    let matches = Cli::command().version(version).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    init_logging(&cli)?;

    match cli.subcommand {
        Subcommands::FastqToBam(args) => fastq_to_bam::fastq_to_bam(args),
    }
}

fn main() {
    if let Err(err) = run() {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
