//! Integration tests for pipeline parsing, validation and partition loading.
//!
//! Loading runs against the in-memory sink so no database is needed.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use partsink_engine::config::parser;
use partsink_engine::config::types::{BatchingConfig, InputFormat};
use partsink_engine::config::validator;
use partsink_engine::source::{partition_inputs, InputSource, PartitionInput};
use partsink_engine::{run_partitions, PartitionLoader};
use partsink_sink::{InsertStatement, MemoryConnector};
use partsink_types::{LengthUnit, PartitionId};

fn fixtures() -> PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests/fixtures")
}

fn loader(sink: &MemoryConnector, max_chunk_size: usize) -> Arc<PartitionLoader<MemoryConnector>> {
    Arc::new(PartitionLoader::new(
        sink.clone(),
        InsertStatement::new(
            "iot.sensor_messages",
            "id varchar(20), temperature numeric(12,5)",
        )
        .unwrap(),
        BatchingConfig {
            max_chunk_size,
            length_unit: LengthUnit::Chars,
        },
    ))
}

#[test]
fn test_parse_and_validate_fixture_pipeline() {
    std::env::set_var("TEST_SINK_PG_HOST", "localhost");
    std::env::set_var("TEST_SINK_PG_PORT", "5433");

    let config = parser::parse_pipeline(&fixtures().join("pipelines/sensor_messages.yaml"))
        .expect("Failed to parse fixture pipeline");

    assert_eq!(config.pipeline, "sensor_messages");
    assert!(config.sink.url.contains("host=localhost port=5433"));
    assert_eq!(config.sink.table, "iot.sensor_messages");
    assert_eq!(config.batching.max_chunk_size, 10_000);
    assert_eq!(config.batching.length_unit, LengthUnit::Chars);
    assert_eq!(config.input.format, InputFormat::Keyed);
    assert_eq!(config.resources.parallelism, 4);

    validator::validate_pipeline(&config).expect("Validation should pass");

    std::env::remove_var("TEST_SINK_PG_HOST");
    std::env::remove_var("TEST_SINK_PG_PORT");
}

#[test]
fn test_minimal_pipeline_uses_defaults() {
    let config = parser::parse_pipeline(&fixtures().join("pipelines/minimal.yaml")).unwrap();
    assert_eq!(config.batching, BatchingConfig::default());
    assert_eq!(config.input.format, InputFormat::Lines);
    assert_eq!(config.resources.parallelism, 1);
    validator::validate_pipeline(&config).expect("Validation should pass");
}

#[test]
fn test_parse_invalid_fixture() {
    let result = parser::parse_pipeline(&fixtures().join("pipelines/invalid_pipeline.yaml"));
    let err = result.expect_err("unknown length unit must be rejected");
    assert!(format!("{err:#}").contains("words"));
}

#[tokio::test]
async fn test_keyed_fixture_partitions_load_to_sink() {
    let sink = MemoryConnector::new();
    let dir = fixtures().join("partitions");
    let inputs = partition_inputs(&[
        dir.join("sensors-0.jsonl").display().to_string(),
        dir.join("sensors-1.jsonl").display().to_string(),
    ]);

    let result = run_partitions(loader(&sink, 10_000), inputs, InputFormat::Keyed, 2)
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.records_read(), 5);
    assert_eq!(result.records_written(), 5);
    assert_eq!(result.chunks_written(), 2);
    assert_eq!(sink.connections_opened(), 2);
    assert_eq!(sink.connections_closed(), 2);

    let mut ids: Vec<String> = sink
        .rows()
        .iter()
        .map(|row| {
            let value: serde_json::Value = serde_json::from_str(row).unwrap();
            value["id"].as_str().unwrap().to_string()
        })
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["s-1", "s-2", "s-3", "s-4", "s-5"]);
}

#[tokio::test]
async fn test_failed_chunk_is_isolated() {
    let sink = MemoryConnector::new().failing_call(1);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for record in ["aaaaaa", "bbbbbb", "cccccc"] {
        writeln!(file, "{record}").unwrap();
    }
    let inputs = vec![PartitionInput {
        id: PartitionId::new(0),
        source: InputSource::File(file.path().to_path_buf()),
    }];

    let result = run_partitions(loader(&sink, 10), inputs, InputFormat::Lines, 1)
        .await
        .unwrap();

    assert!(!result.is_success());
    assert!(result.failures.is_empty());
    let report = &result.reports[0];
    let ok: Vec<bool> = report.outcomes.iter().map(|o| o.is_success()).collect();
    assert_eq!(ok, vec![true, false, true]);
    assert_eq!(report.failed_chunks().count(), 1);
    assert_eq!(sink.rows(), vec!["aaaaaa".to_string(), "cccccc".to_string()]);
    assert_eq!(sink.connections_closed(), 1);
}

#[tokio::test]
async fn test_parallelism_bound_still_loads_every_partition() {
    let sink = MemoryConnector::new();
    let files: Vec<tempfile::NamedTempFile> = (0..6)
        .map(|i| {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "record-{i}").unwrap();
            file
        })
        .collect();
    let args: Vec<String> = files
        .iter()
        .map(|f| f.path().display().to_string())
        .collect();

    let result = run_partitions(loader(&sink, 100), partition_inputs(&args), InputFormat::Lines, 2)
        .await
        .unwrap();

    assert!(result.is_success());
    assert_eq!(result.partitions(), 6);
    let ids: Vec<u32> = result.reports.iter().map(|r| r.partition.index()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(sink.rows().len(), 6);
    assert_eq!(sink.connections_opened(), 6);
}
