use anyhow::bail;
use serde_json::Value;

/// Row/column view of the raw API response. One row per top-level response
/// element; columns are named by decimal index. Cells hold whatever JSON
/// value the server sent; `None` marks a gap left by a row shorter than the
/// widest one.
#[derive(Debug)]
pub struct EmbeddingTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<Value>>>,
}

impl EmbeddingTable {
    /// Build a table from the raw response. The top level must be an array;
    /// array elements become rows of cells, anything else becomes a
    /// single-cell row. Ragged rows are padded with gaps rather than
    /// rejected: the server decides the shape, we just tabulate it.
    pub fn from_response(response: Value) -> anyhow::Result<Self> {
        let Value::Array(elements) = response else {
            bail!(
                "expected a JSON array of embeddings, got {}",
                json_type(&response)
            );
        };

        let mut width = 0;
        let mut rows = Vec::with_capacity(elements.len());
        for element in elements {
            let cells: Vec<Option<Value>> = match element {
                Value::Array(values) => values.into_iter().map(Some).collect(),
                other => vec![Some(other)],
            };
            width = width.max(cells.len());
            rows.push(cells);
        }
        for row in &mut rows {
            row.resize(width, None);
        }

        Ok(Self {
            columns: (0..width).map(|i| i.to_string()).collect(),
            rows,
        })
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<Value>>] {
        &self.rows
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
