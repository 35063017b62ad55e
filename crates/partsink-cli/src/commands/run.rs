use std::path::Path;

use anyhow::Result;
use partsink_engine::orchestrator;
use partsink_engine::RunResult;
use partsink_types::PartitionReport;

/// Execute the `run` command: parse, validate, and load every partition.
pub async fn execute(pipeline_path: &Path, inputs: &[String]) -> Result<()> {
    let config = super::load_pipeline(pipeline_path)?;
    let inputs = super::inputs_or_stdin(inputs);

    tracing::info!(
        pipeline = %config.pipeline,
        table = %config.sink.table,
        partitions = inputs.len(),
        max_chunk_size = config.batching.max_chunk_size,
        "Pipeline validated"
    );

    let result = orchestrator::run_pipeline(&config, inputs).await?;
    print_summary(&config.pipeline, &result);

    if result.is_success() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} partition(s) failed, {} chunk(s) failed",
            result.failures.len(),
            result.chunks_failed()
        )
    }
}

fn print_summary(pipeline: &str, result: &RunResult) {
    let status = if result.is_success() {
        "completed successfully"
    } else {
        "completed with failures"
    };
    println!("Pipeline '{pipeline}' {status}.");
    println!("  Partitions:      {}", result.partitions());
    println!("  Records read:    {}", result.records_read());
    println!("  Records written: {}", result.records_written());
    println!("  Records failed:  {}", result.records_failed());
    println!("  Chunks written:  {}", result.chunks_written());
    println!("  Chunks failed:   {}", result.chunks_failed());
    println!("  Duration:        {:.2}s", result.duration_secs);
    if result.duration_secs > 0.0 {
        #[allow(clippy::cast_precision_loss)]
        let rate = result.records_written() as f64 / result.duration_secs;
        println!("  Throughput:      {rate:.0} records/sec");
    }

    for report in &result.reports {
        print_failed_chunks(report);
    }
    for failure in &result.failures {
        println!("  Partition {} FAILED: {}", failure.partition, failure.error);
    }
}

fn print_failed_chunks(report: &PartitionReport) {
    for outcome in report.failed_chunks() {
        println!(
            "  Partition {} chunk {} FAILED ({} records): {}",
            report.partition,
            outcome.index,
            outcome.records,
            outcome.failure_reason().unwrap_or_default()
        );
    }
}
