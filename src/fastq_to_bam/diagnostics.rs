//! Non-fatal findings reported while aggregating samples.
//!
//! None of the aggregation stages log directly. Instead, each one takes a
//! caller-supplied [`DiagnosticSink`] and reports what it finds there, which
//! keeps the stages free of any global logging state and lets tests inspect
//! exactly what was reported.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::fastq_to_bam::sample::Field;

//============//
// Diagnostic //
//============//

/// A single non-fatal finding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A batch-uniform field holds more than one distinct value across the
    /// read groups. Usually means the export mixes samples that don't belong
    /// together (e.g. more than one patient).
    NonUniformField {
        /// The field that disagrees.
        field: Field,

        /// The distinct values, in order of first appearance.
        values: Vec<String>,
    },

    /// The R2 path of a read group can't be derived from its R1 path.
    PairMismatch {
        /// The read group identifier.
        read_group: String,

        /// The recorded R1 path.
        r1: String,

        /// The R2 path derived from the R1 path.
        expected_r2: String,

        /// The recorded R2 path.
        actual_r2: String,
    },

    /// A file record disagrees with an earlier record of the same read group
    /// on a scalar field. The earlier value is kept.
    ReadGroupConflict {
        /// The read group identifier.
        read_group: String,

        /// The field that disagrees.
        field: Field,

        /// The value recorded first, which is the one kept.
        kept: String,

        /// The value from the later file record.
        conflicting: String,
    },

    /// A file record has no sample name, so its read group identifier falls
    /// back to platform unit naming and may collide with other libraries.
    MissingSampleName {
        /// The library of the file record.
        library: String,
    },
}

impl Diagnostic {
    /// Whether this diagnostic points at a likely problem with the input (as
    /// opposed to being purely informational).
    pub fn is_warning(&self) -> bool {
        !matches!(self, Diagnostic::MissingSampleName { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::NonUniformField { field, values } => write!(
                f,
                "{} has more than one distinct value across read groups: {:?}",
                field, values
            ),
            Diagnostic::PairMismatch {
                read_group,
                r1,
                expected_r2,
                actual_r2,
            } => write!(
                f,
                "R1 and R2 do not pair up for read group {}: R1 is {}, expected R2 to be {} but found {}",
                read_group, r1, expected_r2, actual_r2
            ),
            Diagnostic::ReadGroupConflict {
                read_group,
                field,
                kept,
                conflicting,
            } => write!(
                f,
                "file records of read group {} disagree on {}: keeping {:?}, ignoring {:?}",
                read_group, field, kept, conflicting
            ),
            Diagnostic::MissingSampleName { library } => write!(
                f,
                "no sample name for library {}, naming its read group after the platform unit",
                library
            ),
        }
    }
}

//======//
// Sink //
//======//

/// Somewhere to report [`Diagnostic`]s to.
pub trait DiagnosticSink {
    /// Reports a single diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// A [`DiagnosticSink`] that forwards every diagnostic to the logger and also
/// keeps it for reporting at the end of the run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    /// Everything reported so far, in order.
    reported: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates a new, empty [`Diagnostics`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, in order.
    pub fn reported(&self) -> &[Diagnostic] {
        &self.reported
    }

    /// The number of reported diagnostics that are warnings.
    pub fn warnings(&self) -> usize {
        self.reported.iter().filter(|d| d.is_warning()).count()
    }

    /// Attempts to write the reported diagnostics to a file as a JSON array.
    pub fn write(&self, filepath: impl AsRef<Path>) -> anyhow::Result<()> {
        let mut file = File::create(filepath)?;
        let output = serde_json::to_string_pretty(&self.reported)?;
        file.write_all(output.as_bytes())?;

        Ok(())
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_warning() {
            warn!("{}", diagnostic);
        } else {
            info!("{}", diagnostic);
        }

        self.reported.push(diagnostic);
    }
}
