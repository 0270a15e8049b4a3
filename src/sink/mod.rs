// sink/ — Persistence destinations for the embedding table.
//
// Both sinks are best-effort and independent: the pipeline attempts each one
// and records the outcome instead of failing the run.

pub mod csv;
pub mod db;

/// Which sinks completed during a run. Logged at the end of the run; the
/// process exit code does not depend on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkStatus {
    pub csv_written: bool,
    pub db_written: bool,
}
