//! Pipeline orchestrator: builds the loader, fans partitions out to
//! blocking workers, and collects their reports.

use std::sync::Arc;
use std::time::Instant;

use partsink_sink::{
    Connector, InsertStatement, PostgresConnection, PostgresConnector, SinkConnection, TableName,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::types::{InputFormat, PipelineConfig};
use crate::errors::{LoadError, PipelineError};
use crate::loader::PartitionLoader;
use crate::result::{CheckItem, CheckResult, PartitionFailure, RunResult};
use crate::source::{read_records, PartitionInput};

/// Build the `PostgreSQL` loader described by `config`.
///
/// # Errors
///
/// Returns [`PipelineError::Setup`] if the URL, table or columns are invalid.
pub fn build_loader(
    config: &PipelineConfig,
) -> Result<PartitionLoader<PostgresConnector>, PipelineError> {
    let connector = PostgresConnector::new(&config.sink.url)?;
    let statement = InsertStatement::new(&config.sink.table, &config.sink.columns)?;
    Ok(PartitionLoader::new(connector, statement, config.batching))
}

/// Load every input partition into the sink described by `config`.
///
/// # Errors
///
/// Returns a [`PipelineError`] if the loader cannot be built or a worker
/// panics. Partition and chunk failures are reported in the [`RunResult`].
pub async fn run_pipeline(
    config: &PipelineConfig,
    inputs: Vec<PartitionInput>,
) -> Result<RunResult, PipelineError> {
    let loader = Arc::new(build_loader(config)?);
    tracing::info!(
        pipeline = %config.pipeline,
        endpoint = %loader.connector().endpoint(),
        table = %loader.statement().table(),
        partitions = inputs.len(),
        parallelism = config.resources.parallelism,
        "Starting pipeline run"
    );
    run_partitions(
        loader,
        inputs,
        config.input.format,
        config.resources.parallelism,
    )
    .await
}

/// Load `inputs` with at most `parallelism` partitions in flight.
///
/// Each partition runs start to finish on its own blocking worker. A
/// partition that fails as a whole is recorded and does not cancel its
/// siblings.
///
/// # Errors
///
/// Returns [`PipelineError::Infrastructure`] if a worker panics.
pub async fn run_partitions<C>(
    loader: Arc<PartitionLoader<C>>,
    inputs: Vec<PartitionInput>,
    format: InputFormat,
    parallelism: usize,
) -> Result<RunResult, PipelineError>
where
    C: Connector + 'static,
{
    let start = Instant::now();
    let permits = Arc::new(Semaphore::new(parallelism.max(1)));
    let mut workers: JoinSet<Result<partsink_types::PartitionReport, LoadError>> = JoinSet::new();

    for input in inputs {
        let permit = Arc::clone(&permits).acquire_owned().await.map_err(|e| {
            PipelineError::Infrastructure(anyhow::anyhow!("partition scheduler closed: {e}"))
        })?;
        let loader = Arc::clone(&loader);
        workers.spawn_blocking(move || {
            let _permit = permit;
            tracing::info!(
                partition = %input.id,
                input = %input.source.describe(),
                "Partition received"
            );
            let records = read_records(&input, format)?;
            loader.save_partition(input.id, records)
        });
    }

    let mut result = RunResult::default();
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(Ok(report)) => result.reports.push(report),
            Ok(Err(err)) => {
                tracing::error!(partition = %err.partition(), error = %err, "Partition failed");
                result.failures.push(PartitionFailure {
                    partition: err.partition(),
                    error: err.to_string(),
                });
            }
            Err(join_err) => {
                return Err(PipelineError::Infrastructure(anyhow::anyhow!(
                    "Partition task panicked: {join_err}"
                )));
            }
        }
    }

    result.reports.sort_by_key(|r| r.partition);
    result.failures.sort_by_key(|f| f.partition);
    result.duration_secs = start.elapsed().as_secs_f64();

    tracing::info!(
        partitions = result.partitions(),
        failed_partitions = result.failures.len(),
        records_written = result.records_written(),
        records_failed = result.records_failed(),
        chunks_failed = result.chunks_failed(),
        duration_secs = result.duration_secs,
        "Pipeline run finished"
    );

    Ok(result)
}

/// Check connectivity to the sink and visibility of the target table.
///
/// # Errors
///
/// Returns [`PipelineError::Setup`] for an invalid URL, table or columns, and
/// [`PipelineError::Infrastructure`] if the check worker panics.
pub async fn check_sink(config: &PipelineConfig) -> Result<CheckResult, PipelineError> {
    let connector = PostgresConnector::new(&config.sink.url)?;
    let statement = InsertStatement::new(&config.sink.table, &config.sink.columns)?;

    tokio::task::spawn_blocking(move || check_with(&connector, statement.table()))
        .await
        .map_err(|e| PipelineError::Infrastructure(anyhow::anyhow!("check task panicked: {e}")))
}

fn check_with(connector: &PostgresConnector, table: &TableName) -> CheckResult {
    let endpoint = connector.endpoint();

    let mut connection: PostgresConnection = match connector.connect() {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(endpoint = %endpoint, error = %e, "Sink connection failed");
            return CheckResult {
                endpoint,
                connection: CheckItem::failed(e.to_string()),
                table: None,
            };
        }
    };

    if let Err(e) = connection.ping() {
        return CheckResult {
            endpoint,
            connection: CheckItem::failed(e.to_string()),
            table: None,
        };
    }

    let table_item = match connection.table_exists(table) {
        Ok(true) => CheckItem::ok(format!("table {table} is visible")),
        Ok(false) => CheckItem::failed(format!("table {table} does not exist")),
        Err(e) => CheckItem::failed(e.to_string()),
    };

    if let Err(e) = connection.close() {
        tracing::warn!(endpoint = %endpoint, error = %e, "Failed to close sink connection cleanly");
    }

    CheckResult {
        connection: CheckItem::ok(format!("connected to {endpoint}")),
        endpoint,
        table: Some(table_item),
    }
}
