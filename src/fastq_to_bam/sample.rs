//! The per-read-group sample record built by the grouper and the fixed schema
//! of fields it exposes.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::fastq_to_bam::metadata::FileRecord;

/// Sequencing center recorded for every read group.
pub const SEQUENCING_CENTER: &str = "MSKCC";

/// Sequencing platform recorded for every read group.
pub const SEQUENCING_PLATFORM: &str = "Illumina";

//==============//
// Output Field //
//==============//

/// Every field of the output schema, in output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// The sequencing center.
    SequencingCenter,

    /// The library identifier.
    Library,

    /// The sequencing platform.
    SequencingPlatform,

    /// The platform unit.
    PlatformUnit,

    /// The sample name.
    SampleName,

    /// The read group identifier.
    ReadGroupIdentifier,

    /// The capture bait set.
    BaitSet,

    /// The patient identifier.
    PatientId,

    /// The species.
    Species,

    /// Tumor or normal.
    TumorType,

    /// The IGO identifier of the sample.
    IgoId,

    /// The date of the sequencing run.
    RunDate,

    /// Path to the R1 FASTQ file.
    R1,

    /// Identifier of the R1 file record.
    R1Bid,

    /// Path to the R2 FASTQ file.
    R2,

    /// Identifier of the R2 file record.
    R2Bid,
}

impl Field {
    /// All fields, in output order.
    pub const ALL: [Field; 16] = [
        Field::SequencingCenter,
        Field::Library,
        Field::SequencingPlatform,
        Field::PlatformUnit,
        Field::SampleName,
        Field::ReadGroupIdentifier,
        Field::BaitSet,
        Field::PatientId,
        Field::Species,
        Field::TumorType,
        Field::IgoId,
        Field::RunDate,
        Field::R1,
        Field::R1Bid,
        Field::R2,
        Field::R2Bid,
    ];

    /// The key of this field in the output document.
    pub fn name(&self) -> &'static str {
        match self {
            Field::SequencingCenter => "read_group_sequencing_center",
            Field::Library => "read_group_library",
            Field::SequencingPlatform => "read_group_sequencing_platform",
            Field::PlatformUnit => "read_group_platform_unit",
            Field::SampleName => "read_group_sample_name",
            Field::ReadGroupIdentifier => "read_group_identifier",
            Field::BaitSet => "bait_set",
            Field::PatientId => "patient_id",
            Field::Species => "species",
            Field::TumorType => "tumor_type",
            Field::IgoId => "igo_id",
            Field::RunDate => "run_date",
            Field::R1 => "R1",
            Field::R1Bid => "R1_bid",
            Field::R2 => "R2",
            Field::R2Bid => "R2_bid",
        }
    }

    /// Whether this field is filled from a mate slot rather than from the
    /// scalar metadata of the read group.
    pub fn is_mate(&self) -> bool {
        matches!(self, Field::R1 | Field::R1Bid | Field::R2 | Field::R2Bid)
    }

    /// Whether this field is expected to hold a single value across the whole
    /// batch of read groups.
    pub fn is_batch_uniform(&self) -> bool {
        !matches!(
            self,
            Field::PlatformUnit
                | Field::ReadGroupIdentifier
                | Field::RunDate
                | Field::R1
                | Field::R1Bid
                | Field::R2
                | Field::R2Bid
        )
    }
}

impl Serialize for Field {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//================//
// Read Group Key //
//================//

/// The platform unit and read group identifier derived from a file record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadGroupKey {
    /// The flowcell, suffixed with the barcode index when there is one.
    pub platform_unit: String,

    /// The identifier the file record is grouped under.
    pub read_group_id: String,
}

impl ReadGroupKey {
    /// Derives the key from the sample name, flowcell and barcode index.
    ///
    /// Without a sample name the identifier falls back to `<platform unit>_1`,
    /// which is only unique as long as no two libraries share a platform unit.
    pub fn new(sample_name: &str, flow_cell_id: &str, barcode_index: &str) -> Self {
        let platform_unit = if barcode_index.is_empty() {
            flow_cell_id.to_string()
        } else {
            format!("{}_{}", flow_cell_id, barcode_index)
        };

        let read_group_id = if sample_name.is_empty() {
            format!("{}_1", platform_unit)
        } else {
            format!("{}_{}", sample_name, platform_unit)
        };

        ReadGroupKey {
            platform_unit,
            read_group_id,
        }
    }
}

impl From<&FileRecord> for ReadGroupKey {
    fn from(record: &FileRecord) -> Self {
        ReadGroupKey::new(
            record.sample_name(),
            &record.metadata.libraries.runs.flow_cell_id,
            record.barcode_index(),
        )
    }
}

//======//
// Mate //
//======//

/// A FASTQ file assigned to one of the mate slots of a sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mate {
    /// Path to the FASTQ file.
    pub path: String,

    /// Identifier of the file record the path came from.
    pub bid: String,
}

//===============//
// Sample Record //
//===============//

/// All of the information gathered for a single read group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleRecord {
    /// Always [`SEQUENCING_CENTER`].
    pub sequencing_center: String,
    /// The library identifier.
    pub library: String,
    /// Always [`SEQUENCING_PLATFORM`].
    pub sequencing_platform: String,
    /// The platform unit of the read group.
    pub platform_unit: String,
    /// The sample name, empty when the export has none.
    pub sample_name: String,
    /// The read group identifier.
    pub read_group_id: String,
    /// The capture bait set.
    pub bait_set: String,
    /// The patient identifier.
    pub patient_id: String,
    /// The species the sample came from.
    pub species: String,
    /// Whether the sample is a tumor or a normal.
    pub tumor_type: String,
    /// The IGO identifier of the sample.
    pub igo_id: String,
    /// The date of the sequencing run.
    pub run_date: String,

    /// The first mate of the pair, once seen.
    pub r1: Option<Mate>,

    /// The second mate of the pair, once seen.
    pub r2: Option<Mate>,
}

impl SampleRecord {
    /// Creates a [`SampleRecord`] from the scalar metadata of the first file
    /// record seen for a read group. Mate slots start out empty.
    pub fn new(key: ReadGroupKey, record: &FileRecord) -> Self {
        let metadata = &record.metadata;

        SampleRecord {
            sequencing_center: SEQUENCING_CENTER.to_string(),
            library: metadata.libraries.library_igo_id.clone(),
            sequencing_platform: SEQUENCING_PLATFORM.to_string(),
            platform_unit: key.platform_unit,
            sample_name: record.sample_name().to_string(),
            read_group_id: key.read_group_id,
            bait_set: metadata.bait_set.clone(),
            patient_id: metadata.cmo_patient_id.clone(),
            species: metadata.species.clone(),
            tumor_type: metadata.tumor_or_normal.clone(),
            igo_id: metadata.igo_id.clone(),
            run_date: metadata.libraries.runs.run_date.clone(),
            r1: None,
            r2: None,
        }
    }

    /// Assigns the file record to the mate slot named by its filename. An
    /// occupied slot is overwritten.
    pub fn assign_mate(&mut self, record: &FileRecord) {
        let mate = Mate {
            path: record.file_path.clone(),
            bid: record.sample_id.clone(),
        };

        if record.is_r1() {
            self.r1 = Some(mate);
        } else {
            self.r2 = Some(mate);
        }
    }

    /// Gets the value of a field, if the record has one.
    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::SequencingCenter => &self.sequencing_center,
            Field::Library => &self.library,
            Field::SequencingPlatform => &self.sequencing_platform,
            Field::PlatformUnit => &self.platform_unit,
            Field::SampleName => &self.sample_name,
            Field::ReadGroupIdentifier => &self.read_group_id,
            Field::BaitSet => &self.bait_set,
            Field::PatientId => &self.patient_id,
            Field::Species => &self.species,
            Field::TumorType => &self.tumor_type,
            Field::IgoId => &self.igo_id,
            Field::RunDate => &self.run_date,
            Field::R1 => return self.r1.as_ref().map(|m| m.path.as_str()),
            Field::R1Bid => return self.r1.as_ref().map(|m| m.bid.as_str()),
            Field::R2 => return self.r2.as_ref().map(|m| m.path.as_str()),
            Field::R2Bid => return self.r2.as_ref().map(|m| m.bid.as_str()),
        };

        Some(value.as_str())
    }

    /// The fields this record currently has a value for.
    pub fn fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .collect()
    }

    /// The scalar fields on which `other` disagrees with this record. Mate
    /// slots are not compared.
    pub fn conflicting_fields(&self, other: &SampleRecord) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| !field.is_mate() && self.get(*field) != other.get(*field))
            .collect()
    }
}
