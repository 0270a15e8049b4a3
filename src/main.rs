mod api;
mod config;
mod input;
mod logging;
mod pipeline;
mod settings;
mod sink;
mod table;

use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogLevel;
use crate::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "embed_query", about = "CLI application for embedding query.")]
struct Args {
    /// Path to the config file
    config_file: PathBuf,

    /// Set the logging level
    #[arg(short = 'l', long = "log", value_enum, default_value = "INFO")]
    log: LogLevel,
}

fn main() {
    if let Err(e) = real_main() {
        // Keep stderr noisy for bug reports; details also land in the log file.
        eprintln!("[embed_query] fatal error: {e:?}");
        log::error!("Embedding query failed: {:?}", e);
        std::process::exit(1);
    }
}

fn real_main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_logging(args.log)?;

    log::info!("=== Embedding pipeline started ===");

    let settings = Settings::load(&args.config_file)?;
    let status = pipeline::run(&settings)?;

    // Partial success is a normal, logged outcome; it does not change the
    // exit code.
    log::info!(
        "=== Embedding pipeline finished (csv_written={}, db_written={}) ===",
        status.csv_written,
        status.db_written
    );
    Ok(())
}
