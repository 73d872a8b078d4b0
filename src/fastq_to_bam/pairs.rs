//! Checks that the mates grouped under each read group actually belong
//! together.

use tracing::debug;

use crate::fastq_to_bam::diagnostics::{Diagnostic, DiagnosticSink};
use crate::fastq_to_bam::group::Samples;

/// Derives the R2 path expected for an R1 path by swapping the last `R1` in
/// the path for `R2`. A path without `R1` is returned unchanged.
pub fn expected_r2(r1: &str) -> String {
    match r1.rsplit_once("R1") {
        Some((head, tail)) => format!("{}R2{}", head, tail),
        None => r1.to_string(),
    }
}

/// Reports every read group whose R2 path can't be derived from its R1 path.
/// Nothing is changed and nothing fails here. Read groups missing a mate are
/// skipped; those are rejected when the samples are consolidated.
pub fn validate_pairs(samples: &Samples, sink: &mut impl DiagnosticSink) {
    for (read_group, sample) in samples {
        let (r1, r2) = match (&sample.r1, &sample.r2) {
            (Some(r1), Some(r2)) => (r1, r2),
            _ => {
                debug!("Read group {} is unpaired, skipping pair check.", read_group);
                continue;
            }
        };

        let expected = expected_r2(&r1.path);
        if expected != r2.path {
            sink.report(Diagnostic::PairMismatch {
                read_group: read_group.clone(),
                r1: r1.path.clone(),
                expected_r2: expected,
                actual_r2: r2.path.clone(),
            });
        }
    }
}
