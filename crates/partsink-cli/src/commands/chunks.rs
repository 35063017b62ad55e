use std::path::Path;

use anyhow::Result;
use partsink_engine::partition;
use partsink_engine::source::read_records;

/// Execute the `chunks` command: show how each partition would be chunked.
///
/// Never connects to the sink.
pub fn execute(pipeline_path: &Path, inputs: &[String], show_records: bool) -> Result<()> {
    let config = super::load_pipeline(pipeline_path)?;
    let batching = config.batching;

    println!(
        "Chunk bound: < {} {}",
        batching.max_chunk_size, batching.length_unit
    );

    for input in super::inputs_or_stdin(inputs) {
        let records = read_records(&input, config.input.format)?;
        println!(
            "Partition {} ({}): {} records",
            input.id,
            input.source.describe(),
            records.len()
        );

        for chunk in partition(&records, batching.max_chunk_size, batching.length_unit) {
            let marker = if chunk.len() == 1 && chunk.size >= batching.max_chunk_size {
                " (oversized)"
            } else {
                ""
            };
            println!(
                "  chunk {}: {} records, size {}{marker}",
                chunk.index,
                chunk.len(),
                chunk.size
            );
            if show_records {
                for record in chunk.records {
                    println!("    {record}");
                }
            }
        }
    }

    Ok(())
}
