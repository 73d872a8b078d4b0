//! Groups per-file records into per-read-group samples.

use std::collections::HashSet;

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::fastq_to_bam::diagnostics::{Diagnostic, DiagnosticSink};
use crate::fastq_to_bam::metadata::FileRecord;
use crate::fastq_to_bam::sample::{ReadGroupKey, SampleRecord};

/// Samples keyed by read group identifier, in order of first appearance.
pub type Samples = IndexMap<String, SampleRecord>;

/// Groups the file records by read group.
///
/// The first record seen for a read group provides all of its scalar
/// metadata. Later records for the same read group are checked against it,
/// with every disagreeing field reported, and otherwise only fill (or
/// overwrite) the R1/R2 slot their filename designates.
pub fn group_samples(records: &[FileRecord], sink: &mut impl DiagnosticSink) -> Samples {
    let mut samples = Samples::new();
    let mut unnamed_libraries = HashSet::new();

    for record in records {
        let library = &record.metadata.libraries.library_igo_id;
        if record.sample_name().is_empty() && unnamed_libraries.insert(library.clone()) {
            sink.report(Diagnostic::MissingSampleName {
                library: library.clone(),
            });
        }

        let incoming = SampleRecord::new(ReadGroupKey::from(record), record);
        debug!(
            "Assigning {} to read group {}.",
            record.file_name, incoming.read_group_id
        );

        match samples.entry(incoming.read_group_id.clone()) {
            Entry::Occupied(entry) => {
                let sample = entry.into_mut();
                for field in sample.conflicting_fields(&incoming) {
                    sink.report(Diagnostic::ReadGroupConflict {
                        read_group: sample.read_group_id.clone(),
                        field,
                        kept: sample.get(field).unwrap_or_default().to_string(),
                        conflicting: incoming.get(field).unwrap_or_default().to_string(),
                    });
                }
                sample.assign_mate(record);
            }
            Entry::Vacant(entry) => entry.insert(incoming).assign_mate(record),
        }
    }

    info!(
        "Grouped {} file records into {} read groups.",
        records.len(),
        samples.len()
    );

    samples
}
