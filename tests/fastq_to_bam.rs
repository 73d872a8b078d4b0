//! End-to-end tests for the `access-operators fastq-to-bam` subcommand.

use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::{json, Value};
use tempfile::TempDir;

fn file_record(id: &str, file_name: &str, flow_cell_id: &str, patient_id: &str) -> Value {
    json!({
        "id": id,
        "path": format!("/ifs/archive/{}", file_name),
        "file_name": file_name,
        "metadata": {
            "igoId": "05500_FH_1",
            "baitSet": "MSK-ACCESS-v1_0-probesAllwFP",
            "tumorOrNormal": "Tumor",
            "species": "Human",
            "cmoSampleName": "C-000001-L001-d",
            "cmoPatientId": patient_id,
            "libraries": {
                "libraryIgoId": "05500_FH_1_1_1_1",
                "barcodeIndex": "GTATTGGC",
                "runs": {
                    "flowCellId": flow_cell_id,
                    "runDate": "2019-11-15"
                }
            }
        }
    })
}

fn write_metadata(dir: &Path, results: Vec<Value>) -> std::path::PathBuf {
    let path = dir.join("metadata.json");
    let document = json!({ "count": results.len(), "results": results });
    fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_access-operators"))
        .args(args)
        .output()
        .expect("failed to run access-operators")
}

#[test]
fn test_fastq_to_bam_writes_inputs_and_diagnostics() {
    let dir = TempDir::new().unwrap();
    let metadata = write_metadata(
        dir.path(),
        vec![
            file_record("r1-a", "s_L001_R1_001.fastq.gz", "HCYYWBBXY", "C-000001"),
            file_record("r2-a", "s_L001_R2_001.fastq.gz", "HCYYWBBXY", "C-000001"),
            file_record("r1-b", "s_L002_R1_001.fastq.gz", "HCYYWBBXZ", "C-000002"),
            file_record("r2-b", "s_L002_R2_001.fastq.gz", "HCYYWBBXZ", "C-000002"),
        ],
    );
    let output = dir.path().join("inputs.json");
    let diagnostics = dir.path().join("diagnostics.json");
    let log_file = dir.path().join("access_operators.log");

    let result = run(&[
        "fastq-to-bam",
        "-m",
        metadata.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--diagnostics",
        diagnostics.to_str().unwrap(),
        "--log-file",
        log_file.to_str().unwrap(),
    ]);
    assert!(result.status.success(), "{:?}", result);

    let inputs: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let keys: Vec<&str> = inputs
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        keys,
        vec![
            "read_group_sequencing_center",
            "read_group_library",
            "read_group_sequencing_platform",
            "read_group_platform_unit",
            "read_group_sample_name",
            "read_group_identifier",
            "bait_set",
            "patient_id",
            "species",
            "tumor_type",
            "igo_id",
            "run_date",
            "R1",
            "R1_bid",
            "R2",
            "R2_bid",
        ]
    );
    assert_eq!(inputs["read_group_sequencing_center"], json!("MSKCC"));
    assert_eq!(inputs["read_group_sequencing_platform"], json!("Illumina"));
    assert_eq!(inputs["species"], json!("Human"));
    assert_eq!(inputs["patient_id"], json!(["C-000001", "C-000002"]));
    assert_eq!(
        inputs["read_group_identifier"],
        json!([
            "C-000001-L001-d_HCYYWBBXY_GTATTGGC",
            "C-000001-L001-d_HCYYWBBXZ_GTATTGGC"
        ])
    );
    assert_eq!(
        inputs["R2"],
        json!([
            "/ifs/archive/s_L001_R2_001.fastq.gz",
            "/ifs/archive/s_L002_R2_001.fastq.gz"
        ])
    );
    assert_eq!(inputs["R1_bid"], json!(["r1-a", "r1-b"]));

    let reported: Value =
        serde_json::from_str(&fs::read_to_string(&diagnostics).unwrap()).unwrap();
    assert_eq!(
        reported,
        json!([{
            "kind": "non_uniform_field",
            "field": "patient_id",
            "values": ["C-000001", "C-000002"]
        }])
    );

    let log = fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("Running fastq_to_bam input generation"));
    assert!(log.contains("Elapsed time"));
    assert!(log.contains("CPU process time"));
}

#[test]
fn test_fastq_to_bam_prints_inputs_to_stdout() {
    let dir = TempDir::new().unwrap();
    let metadata = write_metadata(
        dir.path(),
        vec![
            file_record("a", "s_R1_001.fastq.gz", "FC1", "C-000001"),
            file_record("b", "s_R2_001.fastq.gz", "FC1", "C-000001"),
        ],
    );

    let result = run(&["fastq-to-bam", "-q", "-m", metadata.to_str().unwrap()]);
    assert!(result.status.success(), "{:?}", result);

    let inputs: Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(inputs["patient_id"], json!("C-000001"));
    assert_eq!(inputs["R1"], json!(["/ifs/archive/s_R1_001.fastq.gz"]));
}

#[test]
fn test_fastq_to_bam_fails_on_unpaired_read_group() {
    let dir = TempDir::new().unwrap();
    let metadata = write_metadata(
        dir.path(),
        vec![file_record("a", "s_R1_001.fastq.gz", "FC1", "C-000001")],
    );
    let output = dir.path().join("inputs.json");

    let result = run(&[
        "fastq-to-bam",
        "-m",
        metadata.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(!result.status.success());
    assert!(!output.exists());

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("C-000001-L001-d_FC1_GTATTGGC"), "{}", stderr);
    assert!(stderr.contains("R2"), "{}", stderr);
}

#[test]
fn test_fastq_to_bam_rejects_missing_metadata_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");

    let result = run(&["fastq-to-bam", "-m", missing.to_str().unwrap()]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("does not exist"));
}
