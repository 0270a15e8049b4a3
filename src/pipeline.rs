// pipeline.rs — The linear run: load input, call the API, tabulate,
// write both sinks.

use std::path::Path;

use crate::api;
use crate::input;
use crate::settings::Settings;
use crate::sink::{self, SinkStatus};
use crate::table::EmbeddingTable;

/// Execute one full run. Input and network failures propagate to the caller
/// and terminate the run; sink failures do not — each sink is attempted
/// independently and its outcome recorded in the returned status.
pub fn run(settings: &Settings) -> anyhow::Result<SinkStatus> {
    let sentences = input::load_sentences(&settings.json_file_path)?;
    log::info!(
        "Loaded {} sentences from {}",
        sentences.len(),
        settings.json_file_path.display()
    );

    let response = api::run_feature_extraction(&settings.model_id, &settings.hf_token, &sentences)?;

    let table = EmbeddingTable::from_response(response)?;
    let (nrows, ncols) = table.shape();
    log::info!("Assembled embedding table: {} rows, {} columns", nrows, ncols);

    Ok(write_sinks(&table, &settings.output_file, &settings.db_file))
}

/// Best-effort dual write. A failed sink is logged and swallowed so the
/// other sink still gets its attempt; partial success is a normal outcome.
pub fn write_sinks(table: &EmbeddingTable, output_file: &Path, db_file: &Path) -> SinkStatus {
    let mut status = SinkStatus::default();

    match sink::csv::save_to_csv(table, output_file) {
        Ok(()) => status.csv_written = true,
        Err(e) => log::error!(
            "Failed to save embeddings to {}: {:#}",
            output_file.display(),
            e
        ),
    }

    match sink::db::save_to_db(table, db_file) {
        Ok(()) => status.db_written = true,
        Err(e) => log::error!(
            "Failed to save embeddings to database {}: {:#}",
            db_file.display(),
            e
        ),
    }

    status
}
