use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use crate::table::EmbeddingTable;

/// Serialize the table to a delimited text file at `path`, overwriting any
/// existing file. Header row carries the column names; there is no index
/// column. Gap cells become empty fields.
pub fn save_to_csv(table: &EmbeddingTable, path: &Path) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let header: Vec<String> = table.columns().iter().map(|c| escape_field(c)).collect();
    writeln!(writer, "{}", header.join(","))?;

    for row in table.rows() {
        let mut first = true;
        for cell in row {
            if !first {
                writer.write_all(b",")?;
            }
            first = false;
            writer.write_all(render_cell(cell).as_bytes())?;
        }
        writeln!(writer)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed writing {}", path.display()))?;

    let (nrows, ncols) = table.shape();
    log::info!(
        "Embeddings saved to {}. Shape of embeddings: ({}, {})",
        path.display(),
        nrows,
        ncols
    );
    Ok(())
}

fn render_cell(cell: &Option<Value>) -> String {
    match cell {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => escape_field(s),
        // Numbers pass through; nested arrays/objects serialize as JSON text.
        Some(other) => escape_field(&other.to_string()),
    }
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
