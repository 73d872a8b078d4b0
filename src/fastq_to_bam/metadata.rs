//! Typed representation of the sequencing metadata export consumed by the
//! `access-operators fastq-to-bam` subcommand.
//!
//! Every level of nesting in the export has its own struct so that a missing
//! key surfaces as a single decode error instead of a failed lookup somewhere
//! in the middle of the aggregation.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::Error;

/// The top-level metadata document. Only the `results` array is consumed;
/// pagination keys and the like are ignored.
#[derive(Debug, Deserialize)]
pub struct MetadataDocument {
    /// The per-file records.
    pub results: Vec<FileRecord>,
}

impl MetadataDocument {
    /// Decodes a [`MetadataDocument`] from a JSON string.
    pub fn from_json(contents: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Reads and decodes a [`MetadataDocument`] from a file.
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(filepath)?;
        Ok(Self::from_json(&contents)?)
    }
}

/// A single sequenced FASTQ file and its metadata.
#[derive(Clone, Debug, Deserialize)]
pub struct FileRecord {
    /// The identifier of the file record in the export.
    #[serde(rename = "id")]
    pub sample_id: String,

    /// The full path to the FASTQ file.
    #[serde(rename = "path")]
    pub file_path: String,

    /// The name of the FASTQ file. Mate designation is derived from this.
    pub file_name: String,

    /// Patient, library and run metadata for the file.
    pub metadata: Metadata,
}

/// Patient and sample level metadata.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// The IGO identifier of the sample.
    pub igo_id: String,
    /// The capture bait set.
    pub bait_set: String,
    /// Whether the sample is a tumor or a normal.
    pub tumor_or_normal: String,
    /// The species the sample came from.
    pub species: String,

    /// The CMO sample name.
    /// May be `null` in the export.
    pub cmo_sample_name: Option<String>,
    /// The CMO patient identifier.
    pub cmo_patient_id: String,
    /// The library the file was sequenced from.
    pub libraries: Library,
}

/// Library level metadata.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    /// The IGO identifier of the library.
    pub library_igo_id: String,

    /// The barcode index of the library.
    /// May be `null` in the export.
    pub barcode_index: Option<String>,
    /// The sequencing run that produced the file.
    pub runs: Run,
}

/// Sequencing run level metadata.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    /// The flowcell the library was sequenced on.
    pub flow_cell_id: String,
    /// The date of the sequencing run.
    pub run_date: String,
}

impl FileRecord {
    /// Whether this file holds the first mate of the pair. Anything that isn't
    /// named as an R1 file is treated as R2.
    pub fn is_r1(&self) -> bool {
        self.file_name.contains("R1")
    }

    /// The sample name, with `null` treated as empty.
    pub fn sample_name(&self) -> &str {
        self.metadata.cmo_sample_name.as_deref().unwrap_or_default()
    }

    /// The barcode index, with `null` treated as empty.
    pub fn barcode_index(&self) -> &str {
        self.metadata
            .libraries
            .barcode_index
            .as_deref()
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds the JSON for a single file record. Shared with the other test
    /// modules in this subcommand.
    pub(crate) fn file_record_json(
        id: &str,
        file_name: &str,
        sample_name: Option<&str>,
        flow_cell_id: &str,
        barcode_index: Option<&str>,
    ) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "path": format!("/data/{}", file_name),
            "file_name": file_name,
            "metadata": {
                "igoId": "05500_FH_1",
                "baitSet": "MSK-ACCESS-v1_0-probesAllwFP",
                "tumorOrNormal": "Tumor",
                "species": "Human",
                "cmoSampleName": sample_name,
                "cmoPatientId": "C-000001",
                "libraries": {
                    "libraryIgoId": "05500_FH_1_1_1_1",
                    "barcodeIndex": barcode_index,
                    "runs": {
                        "flowCellId": flow_cell_id,
                        "runDate": "2019-11-15"
                    }
                }
            }
        })
    }

    /// Builds a [`FileRecord`] by decoding [`file_record_json`].
    pub(crate) fn file_record(
        id: &str,
        file_name: &str,
        sample_name: Option<&str>,
        flow_cell_id: &str,
        barcode_index: Option<&str>,
    ) -> FileRecord {
        serde_json::from_value(file_record_json(
            id,
            file_name,
            sample_name,
            flow_cell_id,
            barcode_index,
        ))
        .unwrap()
    }

    #[test]
    fn test_decode_document_with_extra_keys() {
        let document = serde_json::json!({
            "count": 1,
            "next": null,
            "results": [file_record_json("a", "s_R1_001.fastq.gz", Some("C-000001-T"), "FC1", Some("IDX5"))]
        });

        let document = MetadataDocument::from_json(&document.to_string()).unwrap();
        assert_eq!(document.results.len(), 1);

        let record = &document.results[0];
        assert_eq!(record.sample_id, "a");
        assert_eq!(record.file_path, "/data/s_R1_001.fastq.gz");
        assert_eq!(record.sample_name(), "C-000001-T");
        assert_eq!(record.barcode_index(), "IDX5");
        assert_eq!(record.metadata.libraries.runs.flow_cell_id, "FC1");
        assert!(record.is_r1());
    }

    #[test]
    fn test_null_fields_are_treated_as_empty() {
        let record = file_record("a", "s_R2_001.fastq.gz", None, "FC1", None);
        assert_eq!(record.sample_name(), "");
        assert_eq!(record.barcode_index(), "");
        assert!(!record.is_r1());
    }

    #[test]
    fn test_missing_field_is_a_decode_error() {
        let mut record = file_record_json("a", "s_R1.fq", None, "FC1", None);
        record["metadata"]["libraries"]["runs"]
            .as_object_mut()
            .unwrap()
            .remove("runDate");
        let document = serde_json::json!({ "results": [record] });

        let err = MetadataDocument::from_json(&document.to_string()).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.to_string().contains("runDate"));
    }

    #[test]
    fn test_missing_results_is_a_decode_error() {
        let err = MetadataDocument::from_json("{}").unwrap_err();
        assert!(err.to_string().contains("results"));
    }
}
