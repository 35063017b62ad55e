use std::path::Path;

use anyhow::Result;
use partsink_engine::orchestrator;
use partsink_engine::CheckItem;

/// Execute the `check` command: validate pipeline config and sink connectivity.
pub async fn execute(pipeline_path: &Path) -> Result<()> {
    let config = super::load_pipeline(pipeline_path)?;
    println!("Pipeline structure: OK");

    let result = orchestrator::check_sink(&config).await?;

    print_item("Sink connection", &result.connection);
    match &result.table {
        Some(table) => print_item("Sink table", table),
        None => println!("{:19} SKIPPED", "Sink table:"),
    }

    if result.is_success() {
        println!("\nAll checks passed.");
        Ok(())
    } else {
        anyhow::bail!("One or more checks failed against {}", result.endpoint)
    }
}

fn print_item(label: &str, item: &CheckItem) {
    let status = if item.ok { "OK" } else { "FAILED" };
    println!("{:19} {}", format!("{label}:"), status);
    if !item.message.is_empty() {
        println!("  {}", item.message);
    }
}
