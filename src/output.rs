//! Output formatting and persistence for gradebook reports.
//!
//! Supports pretty-printing, JSON serialization and CSV ranking export.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::RankedStudent;
use csv::WriterBuilder;
use std::fs::{self, File};
use std::path::Path;

/// Logs any report using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs any report as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a report as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;
    debug!(path = %path.display(), "JSON report written");
    Ok(())
}

#[derive(Serialize)]
struct RankingRow<'a> {
    rank: usize,
    student: &'a str,
    score: f64,
    band: &'static str,
    percentile_rank: f64,
}

/// Writes the composite ranking as CSV, one row per student, replacing any
/// existing file.
pub fn write_ranking_csv(path: &Path, ranking: &[RankedStudent]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for (idx, row) in ranking.iter().enumerate() {
        writer.serialize(RankingRow {
            rank: idx + 1,
            student: &row.student,
            score: row.score,
            band: row.band.label(),
            percentile_rank: row.percentile_rank,
        })?;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = ranking.len(), "Ranking CSV written");
    Ok(())
}
