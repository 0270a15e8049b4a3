use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SentenceFile {
    sentences: Vec<SentenceRecord>,
}

/// One entry of the input file. Fields other than `sentence` are ignored.
#[derive(Debug, Deserialize)]
struct SentenceRecord {
    sentence: String,
}

/// Read the input file and extract the sentence strings in file order.
/// The order is meaningful: it maps positionally onto the output rows.
pub fn load_sentences(path: &Path) -> anyhow::Result<Vec<String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?;
    let parsed: SentenceFile = serde_json::from_str(&raw)
        .with_context(|| format!("invalid sentences file {}", path.display()))?;
    Ok(parsed.sentences.into_iter().map(|r| r.sentence).collect())
}
