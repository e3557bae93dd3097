use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::{parse_score, DatasetError};

/// One prime/target trial from a semantic priming dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimingRecord {
    pub prime: String,
    pub target: String,
    /// Reaction time; `None` when the cell is empty or not a number.
    pub rt: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawPrimingRow {
    prime: String,
    target: String,
    #[serde(default)]
    rt: String,
}

/// Reads a CSV with at least the `prime`, `target` and `rt` columns.
pub fn load_priming_dataset(path: impl AsRef<Path>) -> Result<Vec<PrimingRecord>, DatasetError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))?;

    let mut records = Vec::new();
    for row in reader.deserialize::<RawPrimingRow>() {
        let row = row.map_err(|e| DatasetError::csv(path, e))?;
        records.push(PrimingRecord {
            rt: parse_score(&row.rt),
            prime: row.prime,
            target: row.target,
        });
    }

    Ok(records)
}

/// Lowercased `(prime, target)` to reaction time. The first occurrence of a
/// pair wins and rows without a reaction time are left out.
pub fn priming_scores(records: &[PrimingRecord]) -> HashMap<(String, String), f64> {
    let mut scores = HashMap::new();
    for record in records {
        let Some(rt) = record.rt else {
            continue;
        };
        scores
            .entry((record.prime.to_lowercase(), record.target.to_lowercase()))
            .or_insert(rt);
    }
    scores
}
