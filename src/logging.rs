use std::path::PathBuf;

use anyhow::Context;
use clap::ValueEnum;
use flexi_logger::{DeferredNow, FileSpec, Logger};

use crate::config;

/// Log levels accepted on the command line. `WARNING` and `CRITICAL` map onto
/// the closest Rust levels (`warn` and `error`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "ERROR")]
    Error,
    #[value(name = "CRITICAL")]
    Critical,
}

impl LogLevel {
    fn as_spec(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

pub fn init_logging(level: LogLevel) -> anyhow::Result<()> {
    let log_dir = PathBuf::from(config::logging::LOG_DIR);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed creating log dir {}", log_dir.display()))?;

    // Append to log/pipeline.log across runs; no rotation.
    Logger::try_with_str(level.as_spec())?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(config::logging::LOG_BASENAME)
                .suppress_timestamp(),
        )
        .append()
        .format(pipeline_format)
        .start()
        .context("failed to start logger")?;

    Ok(())
}

// One line per record: `<timestamp> - <LEVEL> - <message>`.
fn pipeline_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} - {} - {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::Debug.as_spec(), "debug");
        assert_eq!(LogLevel::Warning.as_spec(), "warn");
        // Rust's log has no CRITICAL; it collapses onto error.
        assert_eq!(LogLevel::Critical.as_spec(), "error");
    }
}
