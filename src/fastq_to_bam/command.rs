//! Functionality relating to the `access-operators fastq-to-bam` subcommand
//! itself.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use tracing::{debug, info, warn};

use crate::fastq_to_bam::aggregate;
use crate::fastq_to_bam::diagnostics::Diagnostics;
use crate::fastq_to_bam::metadata::MetadataDocument;
use crate::utils::args::existing_path;
use crate::utils::display::MinutesFormat;
use crate::utils::time::process_cpu_time;

/// Clap arguments for the `access-operators fastq-to-bam` subcommand.
#[derive(Args, Debug)]
pub struct FastqToBamArgs {
    /// Metadata export describing the FASTQ files to generate inputs for.
    #[arg(short = 'm', long, value_name = "PATH")]
    #[arg(value_parser = existing_path)]
    pub meta_information_json: PathBuf,

    /// Reference inputs JSON for the workflow. Reserved; the contents are not
    /// used when generating inputs.
    #[arg(short = 'r', long, value_name = "PATH")]
    #[arg(value_parser = existing_path)]
    pub reference_json: Option<PathBuf>,

    /// Write the generated inputs to this file instead of stdout.
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write every warning raised while generating the inputs to this file as
    /// JSON.
    #[arg(long, value_name = "PATH")]
    pub diagnostics: Option<PathBuf>,
}

/// Main function for the `access-operators fastq-to-bam` subcommand.
pub fn fastq_to_bam(args: FastqToBamArgs) -> anyhow::Result<()> {
    info!("==================================================");
    info!(">>> Running fastq_to_bam input generation <<<");
    info!("==================================================");
    let start = Instant::now();

    debug!("Arguments:");
    debug!(
        "  [*] Metadata JSON: {}",
        args.meta_information_json.display()
    );
    debug!("  [*] Reference JSON: {:?}", args.reference_json);
    debug!("  [*] Output: {:?}", args.output);
    debug!("  [*] Diagnostics: {:?}", args.diagnostics);

    // (1) Decode the metadata export.
    let src = args.meta_information_json;
    let document = MetadataDocument::read(&src)
        .with_context(|| format!("reading metadata from {}", src.display()))?;
    info!("Read {} file records.", document.results.len());

    // (2) Group, validate and consolidate. Warnings are logged as they are
    // found and kept for the optional report.
    let mut diagnostics = Diagnostics::new();
    let inputs = aggregate(&document, &mut diagnostics)?;

    // (3) Write the inputs document.
    match args.output {
        Some(path) => {
            inputs
                .write(&path)
                .with_context(|| format!("writing inputs to {}", path.display()))?;
            info!("Wrote inputs to {}.", path.display());
        }
        None => println!("{}", inputs.to_json()?),
    }

    if let Some(path) = args.diagnostics {
        diagnostics
            .write(&path)
            .with_context(|| format!("writing diagnostics to {}", path.display()))?;
    }

    if diagnostics.warnings() > 0 {
        warn!(
            "Generated inputs with {} warnings. Review the metadata before running the workflow.",
            diagnostics.warnings()
        );
    }

    info!("--------------------------------------------------");
    info!("Elapsed time: {} [min]", MinutesFormat(start.elapsed()));
    if let Some(cpu_time) = process_cpu_time() {
        info!("CPU process time: {} [min]", MinutesFormat(cpu_time));
    }
    info!("--------------------------------------------------");

    Ok(())
}
