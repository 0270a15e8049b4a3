use std::path::Path;

use anyhow::{bail, Context};
use rusqlite::{params_from_iter, Connection};
use serde_json::Value;

use crate::config;
use crate::table::EmbeddingTable;

/// Open (or create) the database at `db_file` and fully replace the
/// embeddings table with the given data. The connection is scoped to this
/// call: it is closed by drop on every exit path, success or failure.
pub fn save_to_db(table: &EmbeddingTable, db_file: &Path) -> anyhow::Result<()> {
    let mut conn = Connection::open(db_file)
        .with_context(|| format!("failed to open database {}", db_file.display()))?;
    replace_embeddings(&mut conn, table)?;

    let (nrows, ncols) = table.shape();
    log::info!(
        "Embeddings saved to database {}. Shape of embeddings: ({}, {})",
        db_file.display(),
        nrows,
        ncols
    );
    Ok(())
}

/// Drop-and-recreate the embeddings table, then insert every row in one
/// transaction. Never appends: each run replaces the previous contents.
pub fn replace_embeddings(conn: &mut Connection, table: &EmbeddingTable) -> anyhow::Result<()> {
    if table.columns().is_empty() {
        bail!("refusing to write a table with no columns");
    }

    let table_name = config::db::EMBEDDINGS_TABLE;
    let column_defs: Vec<String> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, name)| format!("{} {}", quote_ident(name), column_affinity(table, idx)))
        .collect();

    conn.execute_batch(&format!(
        "DROP TABLE IF EXISTS {table_name};\nCREATE TABLE {table_name} ({});",
        column_defs.join(", ")
    ))?;

    let column_list: Vec<String> = table.columns().iter().map(|c| quote_ident(c)).collect();
    let placeholders: Vec<&str> = table.columns().iter().map(|_| "?").collect();
    let insert_sql = format!(
        "INSERT INTO {table_name} ({}) VALUES ({})",
        column_list.join(", "),
        placeholders.join(", ")
    );

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(&insert_sql)?;
        for row in table.rows() {
            stmt.execute(params_from_iter(row.iter().map(bind_cell)))?;
        }
    }
    tx.commit()?;

    Ok(())
}

// REAL when every present cell in the column is numeric, TEXT otherwise.
fn column_affinity(table: &EmbeddingTable, column: usize) -> &'static str {
    for row in table.rows() {
        match &row[column] {
            None | Some(Value::Null) | Some(Value::Number(_)) => {}
            Some(_) => return "TEXT",
        }
    }
    "REAL"
}

fn bind_cell(cell: &Option<Value>) -> rusqlite::types::Value {
    match cell {
        None | Some(Value::Null) => rusqlite::types::Value::Null,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) => rusqlite::types::Value::Real(f),
            None => rusqlite::types::Value::Text(n.to_string()),
        },
        Some(Value::String(s)) => rusqlite::types::Value::Text(s.clone()),
        Some(other) => rusqlite::types::Value::Text(other.to_string()),
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
