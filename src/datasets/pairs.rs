use std::collections::HashMap;
use std::path::Path;

use super::{parse_score, DatasetError};

/// A word pair from a CSV with a header row: two word columns, then an
/// optional score column.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRecord {
    pub word1: String,
    pub word2: String,
    pub score: Option<f64>,
}

/// A rated pair from a third-party similarity dataset (headerless TSV).
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityRecord {
    pub word1: String,
    pub word2: String,
    pub score: f64,
}

pub fn load_pair_dataset(path: impl AsRef<Path>) -> Result<Vec<PairRecord>, DatasetError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| DatasetError::csv(path, e))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let (Some(word1), Some(word2)) = (row.get(0), row.get(1)) else {
            return Err(DatasetError::malformed(path, line, "expected at least two columns"));
        };

        records.push(PairRecord {
            word1: word1.to_string(),
            word2: word2.to_string(),
            score: row.get(2).and_then(parse_score),
        });
    }

    Ok(records)
}

pub fn load_similarity_dataset(path: impl AsRef<Path>) -> Result<Vec<SimilarityRecord>, DatasetError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| DatasetError::csv(path, e))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        if row.len() < 3 {
            return Err(DatasetError::malformed(
                path,
                line,
                format!("expected 3 tab-separated fields, found {}", row.len()),
            ));
        }

        let score = parse_score(&row[2]).ok_or_else(|| {
            DatasetError::malformed(path, line, format!("invalid score {:?}", &row[2]))
        })?;

        records.push(SimilarityRecord {
            word1: row[0].to_string(),
            word2: row[1].to_string(),
            score,
        });
    }

    Ok(records)
}

/// Lowercased pair to score, stored in both orders. The first rating of a
/// pair wins.
pub fn similarity_scores(records: &[SimilarityRecord]) -> HashMap<(String, String), f64> {
    let mut scores = HashMap::new();
    for record in records {
        let word1 = record.word1.to_lowercase();
        let word2 = record.word2.to_lowercase();
        let key = (word1.clone(), word2.clone());
        if scores.contains_key(&key) {
            continue;
        }
        scores.insert(key, record.score);
        scores.insert((word2, word1), record.score);
    }
    scores
}
