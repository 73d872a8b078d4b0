//! Functionality related to the `access-operators fastq-to-bam` subcommand.
//!
//! The subcommand turns a sequencing metadata export into the inputs document
//! for the `fastq_to_bam` workflow. The work happens in three stages, each
//! feeding the next:
//!
//! 1. [`group::group_samples`] groups the per-file records by read group and
//!    pairs up the R1/R2 mates.
//! 2. [`pairs::validate_pairs`] checks each pair's R2 path can be derived from
//!    its R1 path.
//! 3. [`consolidate::consolidate`] transposes the samples into columns and
//!    collapses the fields that should agree across the batch.
//!
//! Findings that don't stop the run are reported to a
//! [`DiagnosticSink`](diagnostics::DiagnosticSink) supplied by the caller.

pub mod command;
pub mod consolidate;
pub mod diagnostics;
pub mod group;
pub mod metadata;
pub mod pairs;
pub mod results;
pub mod sample;

use crate::errors::Error;
use crate::fastq_to_bam::diagnostics::DiagnosticSink;
use crate::fastq_to_bam::metadata::MetadataDocument;
use crate::fastq_to_bam::results::FastqToBamInputs;

/// Runs all three stages over a decoded metadata document.
pub fn aggregate(
    document: &MetadataDocument,
    sink: &mut impl DiagnosticSink,
) -> Result<FastqToBamInputs, Error> {
    let samples = group::group_samples(&document.results, sink);
    pairs::validate_pairs(&samples, sink);
    consolidate::consolidate(&samples, sink)
}
