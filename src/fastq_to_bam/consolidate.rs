//! Folds the grouped samples into the column-oriented inputs document.

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::debug;

use crate::errors::Error;
use crate::fastq_to_bam::diagnostics::{Diagnostic, DiagnosticSink};
use crate::fastq_to_bam::group::Samples;
use crate::fastq_to_bam::results::{FastqToBamInputs, FieldValue};
use crate::fastq_to_bam::sample::Field;

/// One list of values per field, each in read group order.
pub type Columns = IndexMap<Field, Vec<String>>;

/// Transposes the samples into one column per field. Every sample must carry
/// every field; the first one that doesn't is reported along with its read
/// group.
pub fn transpose(samples: &Samples) -> Result<Columns, Error> {
    let mut columns: Columns = Field::ALL
        .into_iter()
        .map(|field| (field, Vec::with_capacity(samples.len())))
        .collect();

    for (read_group, sample) in samples {
        for (field, column) in columns.iter_mut() {
            let value = sample.get(*field).ok_or_else(|| Error::MissingField {
                read_group: read_group.clone(),
                field: *field,
            })?;
            column.push(value.to_string());
        }
    }

    Ok(columns)
}

/// Collapses a column to a scalar when the field is batch-uniform and all of
/// the values agree. A batch-uniform field that disagrees stays a list and is
/// reported.
pub fn collapse(field: Field, values: Vec<String>, sink: &mut impl DiagnosticSink) -> FieldValue {
    if !field.is_batch_uniform() {
        return FieldValue::List(values);
    }

    let mut distinct: Vec<String> = values.iter().unique().cloned().collect();
    match distinct.len() {
        0 => FieldValue::List(values),
        1 => FieldValue::Scalar(distinct.remove(0)),
        _ => {
            sink.report(Diagnostic::NonUniformField {
                field,
                values: distinct,
            });
            FieldValue::List(values)
        }
    }
}

/// Builds the [`FastqToBamInputs`] from the grouped samples.
pub fn consolidate(
    samples: &Samples,
    sink: &mut impl DiagnosticSink,
) -> Result<FastqToBamInputs, Error> {
    let columns = transpose(samples)?;

    let mut inputs = FastqToBamInputs::default();
    for (field, values) in columns {
        let value = collapse(field, values, sink);
        debug!("  [*] {}: {:?}", field, value);
        *inputs.get_mut(field) = value;
    }

    Ok(inputs)
}
