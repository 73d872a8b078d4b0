//! Module holding the results structs for the `access-operators fastq-to-bam`
//! subcommand.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::fastq_to_bam::sample::Field;

/// The value of a single output field: either the one value every read group
/// agrees on, or one value per read group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// All read groups share this value.
    Scalar(String),

    /// One value per read group, in read group order.
    List(Vec<String>),
}

impl FieldValue {
    /// Gets the scalar value, if this is one.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FieldValue::Scalar(value) => Some(value.as_str()),
            FieldValue::List(_) => None,
        }
    }

    /// Gets the list of values, if this is one.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::Scalar(_) => None,
            FieldValue::List(values) => Some(values.as_slice()),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::List(Vec::new())
    }
}

/// Struct holding the final results for an `access-operators fastq-to-bam`
/// subcommand call: the inputs document for the `fastq_to_bam` workflow.
/// Serializes as one entry per [`Field`], keyed by its name and in schema
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FastqToBamInputs {
    /// The sequencing center.
    pub read_group_sequencing_center: FieldValue,
    /// The library identifiers.
    pub read_group_library: FieldValue,
    /// The sequencing platform.
    pub read_group_sequencing_platform: FieldValue,
    /// The platform unit of each read group.
    pub read_group_platform_unit: FieldValue,
    /// The sample names.
    pub read_group_sample_name: FieldValue,
    /// The identifier of each read group.
    pub read_group_identifier: FieldValue,
    /// The capture bait sets.
    pub bait_set: FieldValue,
    /// The patient identifiers.
    pub patient_id: FieldValue,
    /// The species.
    pub species: FieldValue,
    /// Tumor or normal.
    pub tumor_type: FieldValue,
    /// The IGO identifiers of the samples.
    pub igo_id: FieldValue,
    /// The sequencing run date of each read group.
    pub run_date: FieldValue,
    /// Path to the R1 FASTQ file of each read group.
    pub r1: FieldValue,
    /// Identifier of the R1 file record of each read group.
    pub r1_bid: FieldValue,
    /// Path to the R2 FASTQ file of each read group.
    pub r2: FieldValue,
    /// Identifier of the R2 file record of each read group.
    pub r2_bid: FieldValue,
}

impl Serialize for FastqToBamInputs {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(Field::ALL.len()))?;
        for field in Field::ALL {
            map.serialize_entry(&field, self.get(field))?;
        }
        map.end()
    }
}

impl FastqToBamInputs {
    /// Gets the value of a field.
    pub fn get(&self, field: Field) -> &FieldValue {
        match field {
            Field::SequencingCenter => &self.read_group_sequencing_center,
            Field::Library => &self.read_group_library,
            Field::SequencingPlatform => &self.read_group_sequencing_platform,
            Field::PlatformUnit => &self.read_group_platform_unit,
            Field::SampleName => &self.read_group_sample_name,
            Field::ReadGroupIdentifier => &self.read_group_identifier,
            Field::BaitSet => &self.bait_set,
            Field::PatientId => &self.patient_id,
            Field::Species => &self.species,
            Field::TumorType => &self.tumor_type,
            Field::IgoId => &self.igo_id,
            Field::RunDate => &self.run_date,
            Field::R1 => &self.r1,
            Field::R1Bid => &self.r1_bid,
            Field::R2 => &self.r2,
            Field::R2Bid => &self.r2_bid,
        }
    }

    /// Gets a mutable reference to the value of a field.
    pub fn get_mut(&mut self, field: Field) -> &mut FieldValue {
        match field {
            Field::SequencingCenter => &mut self.read_group_sequencing_center,
            Field::Library => &mut self.read_group_library,
            Field::SequencingPlatform => &mut self.read_group_sequencing_platform,
            Field::PlatformUnit => &mut self.read_group_platform_unit,
            Field::SampleName => &mut self.read_group_sample_name,
            Field::ReadGroupIdentifier => &mut self.read_group_identifier,
            Field::BaitSet => &mut self.bait_set,
            Field::PatientId => &mut self.patient_id,
            Field::Species => &mut self.species,
            Field::TumorType => &mut self.tumor_type,
            Field::IgoId => &mut self.igo_id,
            Field::RunDate => &mut self.run_date,
            Field::R1 => &mut self.r1,
            Field::R1Bid => &mut self.r1_bid,
            Field::R2 => &mut self.r2,
            Field::R2Bid => &mut self.r2_bid,
        }
    }

    /// Renders the results as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Attempts to write the results to a file as JSON.
    pub fn write(&self, filepath: impl AsRef<Path>) -> anyhow::Result<()> {
        let mut file = File::create(filepath)?;
        let output = self.to_json()?;
        file.write_all(output.as_bytes())?;

        Ok(())
    }
}
