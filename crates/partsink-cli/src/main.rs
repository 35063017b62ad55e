mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "partsink",
    version,
    about = "Load partitioned record streams into PostgreSQL in size-bounded chunks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Load input partitions into the sink table
    Run {
        /// Path to pipeline YAML file
        pipeline: PathBuf,
        /// Partition inputs, one per file (`-` for stdin, the default)
        inputs: Vec<String>,
    },
    /// Validate pipeline configuration and sink connectivity
    Check {
        /// Path to pipeline YAML file
        pipeline: PathBuf,
    },
    /// Print the chunks each partition would be split into, without writing
    Chunks {
        /// Path to pipeline YAML file
        pipeline: PathBuf,
        /// Partition inputs, one per file (`-` for stdin, the default)
        inputs: Vec<String>,
        /// Also print the records of each chunk
        #[arg(long)]
        records: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    match cli.command {
        Commands::Run { pipeline, inputs } => commands::run::execute(&pipeline, &inputs).await,
        Commands::Check { pipeline } => commands::check::execute(&pipeline).await,
        Commands::Chunks {
            pipeline,
            inputs,
            records,
        } => commands::chunks::execute(&pipeline, &inputs, records),
    }
}
