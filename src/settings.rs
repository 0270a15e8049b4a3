// settings.rs — Run configuration from an INI-style config file.
//
// The file must carry a [Settings] section with the five keys below.
// Both `key = value` and `key: value` are accepted; `#` and `;` start
// comment lines.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

const SETTINGS_SECTION: &str = "Settings";

/// Resolved configuration for one run. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Settings {
    pub json_file_path: PathBuf,
    pub model_id: String,
    pub hf_token: String,
    pub output_file: PathBuf,
    pub db_file: PathBuf,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let sections = parse_ini(&raw);
        let section = sections.get(SETTINGS_SECTION).with_context(|| {
            format!("missing [{}] section in {}", SETTINGS_SECTION, path.display())
        })?;

        Ok(Self {
            json_file_path: PathBuf::from(require(section, "json_file_path")?),
            model_id: require(section, "model_id")?.to_string(),
            hf_token: require(section, "hf_token")?.to_string(),
            output_file: PathBuf::from(require(section, "output_file")?),
            db_file: PathBuf::from(require(section, "db_file")?),
        })
    }
}

fn require<'a>(section: &'a HashMap<String, String>, key: &str) -> anyhow::Result<&'a str> {
    section
        .get(key)
        .map(String::as_str)
        .with_context(|| format!("missing key '{key}' in [{SETTINGS_SECTION}]"))
}

fn parse_ini(raw: &str) -> HashMap<String, HashMap<String, String>> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current = String::new();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            current = name.trim().to_string();
            sections.entry(current.clone()).or_default();
            continue;
        }
        if let Some((key, value)) = line.split_once('=').or_else(|| line.split_once(':')) {
            sections
                .entry(current.clone())
                .or_default()
                .insert(key.trim().to_string(), value.trim().to_string());
        }
        // Lines that are neither section headers nor key/value pairs are skipped.
    }

    sections
}
