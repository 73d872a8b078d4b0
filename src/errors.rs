//! Errors that stop a run of the sample aggregation.

use thiserror::Error;

use crate::fastq_to_bam::sample::Field;

/// A fatal, structural problem with the metadata or with the grouped samples.
/// Anything recoverable is reported as a
/// [`Diagnostic`](crate::fastq_to_bam::diagnostics::Diagnostic) instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The metadata document is not valid JSON or is missing an expected field.
    #[error("could not decode metadata document: {0}")]
    Decode(#[from] serde_json::Error),

    /// A grouped sample does not carry a value for one of the fields of the
    /// output schema.
    #[error("read group `{read_group}` is missing the `{field}` field")]
    MissingField {
        /// The read group identifier of the offending sample.
        read_group: String,

        /// The field that was missing.
        field: Field,
    },
}
