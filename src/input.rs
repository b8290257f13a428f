//! Loading grade records and weight tables from disk.
//!
//! Grades are CSV with a `student,subject,score` header. Weights are either
//! CSV (`subject,weight`) or a JSON object:
//! ```json
//! { "Math": 0.5, "English": 0.3, "Science": 0.2 }
//! ```
//! Any path ending in `.gz` is decompressed on the fly.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

use crate::gradebook::Gradebook;

/// A single row of a grade CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GradeRecord {
    pub student: String,
    pub subject: String,
    pub score: i64,
}

#[derive(Debug, Deserialize)]
struct WeightRecord {
    subject: String,
    weight: f64,
}

fn open(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Extension of the file once any trailing `.gz` is stripped.
fn inner_extension(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let name = name.strip_suffix(".gz").unwrap_or(name);
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Parses grade records from any CSV reader.
///
/// # Errors
///
/// Fails on malformed rows, including a score that is not an integer.
pub fn read_grades<R: Read>(reader: R) -> Result<Vec<GradeRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: GradeRecord = result?;
        rows.push(record);
    }
    Ok(rows)
}

/// Loads a grade CSV from `path`.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_grades(path: &Path) -> Result<Vec<GradeRecord>> {
    let rows = read_grades(open(path)?)
        .with_context(|| format!("invalid grade file {}", path.display()))?;
    debug!(rows = rows.len(), "Grade rows parsed");
    Ok(rows)
}

/// Parses a weight table from CSV.
pub fn read_weights_csv<R: Read>(reader: R) -> Result<BTreeMap<String, f64>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut weights = BTreeMap::new();
    for result in rdr.deserialize() {
        let record: WeightRecord = result?;
        weights.insert(record.subject, record.weight);
    }
    Ok(weights)
}

/// Parses a weight table from a JSON object.
pub fn read_weights_json<R: Read>(reader: R) -> Result<BTreeMap<String, f64>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Loads a weight table, picking JSON or CSV from the file extension.
#[tracing::instrument(skip(path), fields(path = %path.display()))]
pub fn load_weights(path: &Path) -> Result<BTreeMap<String, f64>> {
    let reader = open(path)?;
    let weights = match inner_extension(path).as_deref() {
        Some("json") => read_weights_json(reader),
        _ => read_weights_csv(reader),
    }
    .with_context(|| format!("invalid weight file {}", path.display()))?;
    debug!(subjects = weights.len(), "Weights parsed");
    Ok(weights)
}

/// Builds a [`Gradebook`] from a grade file and an optional weight file.
///
/// Rows are applied in file order, so a repeated `(student, subject)` keeps
/// the last score.
pub fn load_gradebook(grades: &Path, weights: Option<&Path>) -> Result<Gradebook> {
    let mut book = Gradebook::new();

    if let Some(path) = weights {
        book.set_weights(load_weights(path)?)
            .with_context(|| format!("rejected weights from {}", path.display()))?;
    }

    let rows = load_grades(grades)?;
    for (line, row) in rows.iter().enumerate() {
        book.add_grade(&row.student, &row.subject, row.score)
            .with_context(|| format!("{} record {}", grades.display(), line + 1))?;
    }

    info!(
        students = book.store().student_count(),
        records = rows.len(),
        weighted_subjects = book.weights().len(),
        "Gradebook loaded"
    );
    Ok(book)
}
