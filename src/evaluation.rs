//! Correlating embedding similarities with human judgments, or with another model.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::datasets::{CorrelationMatrix, PairRecord, PrimingRecord, SimilarityRecord};
use crate::embeddings::EmbeddingTable;
use crate::similarity::cosine_similarity;
use crate::stats::{kendall_tau, spearman, CorrelationResult};

/// Two words and, when available, a numeric gold score.
pub trait ScoredPair {
    fn first(&self) -> &str;
    fn second(&self) -> &str;
    fn score(&self) -> Option<f64>;
}

impl ScoredPair for PrimingRecord {
    fn first(&self) -> &str {
        &self.prime
    }

    fn second(&self) -> &str {
        &self.target
    }

    fn score(&self) -> Option<f64> {
        self.rt
    }
}

impl ScoredPair for PairRecord {
    fn first(&self) -> &str {
        &self.word1
    }

    fn second(&self) -> &str {
        &self.word2
    }

    fn score(&self) -> Option<f64> {
        self.score
    }
}

impl ScoredPair for SimilarityRecord {
    fn first(&self) -> &str {
        &self.word1
    }

    fn second(&self) -> &str {
        &self.word2
    }

    fn score(&self) -> Option<f64> {
        Some(self.score)
    }
}

impl<S: AsRef<str>> ScoredPair for (S, S, f64) {
    fn first(&self) -> &str {
        self.0.as_ref()
    }

    fn second(&self) -> &str {
        self.1.as_ref()
    }

    fn score(&self) -> Option<f64> {
        Some(self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub spearman: CorrelationResult,
    pub kendall: CorrelationResult,
    pub found: usize,
    pub not_found: usize,
}

/// Rank-correlates cosine similarities from `table` with the gold scores.
///
/// A row counts as found when both lowercased words are in the table, its
/// score is numeric and the cosine is defined.
pub fn evaluate<R: ScoredPair>(rows: &[R], table: &EmbeddingTable) -> Evaluation {
    let mut predictions = Vec::with_capacity(rows.len());
    let mut labels = Vec::with_capacity(rows.len());
    let mut not_found = 0;

    for row in rows {
        let Some(score) = row.score() else {
            not_found += 1;
            continue;
        };

        let w1 = row.first().to_lowercase();
        let w2 = row.second().to_lowercase();
        let (Some(v1), Some(v2)) = (table.get(&w1), table.get(&w2)) else {
            not_found += 1;
            continue;
        };

        let similarity = cosine_similarity(v1, v2);
        if similarity.is_nan() {
            debug!(word1 = %w1, word2 = %w2, "cosine similarity undefined, pair excluded");
            not_found += 1;
            continue;
        }

        predictions.push(similarity);
        labels.push(score);
    }

    Evaluation {
        spearman: spearman(&labels, &predictions),
        kendall: kendall_tau(&labels, &predictions),
        found: labels.len(),
        not_found,
    }
}

/// Spearman rho between the similarities two models assign to the dataset's
/// word pairs, restricted to words both models know.
pub fn embedding_correlation<R: ScoredPair>(
    rows: &[R],
    first: &EmbeddingTable,
    second: &EmbeddingTable,
) -> CorrelationResult {
    let common: HashSet<&str> = first.words().filter(|word| second.contains(word)).collect();

    let mut predictions1 = Vec::new();
    let mut predictions2 = Vec::new();
    for row in rows {
        let w1 = row.first().to_lowercase();
        let w2 = row.second().to_lowercase();
        if !common.contains(w1.as_str()) || !common.contains(w2.as_str()) {
            continue;
        }

        let (Some(a1), Some(a2), Some(b1), Some(b2)) =
            (first.get(&w1), first.get(&w2), second.get(&w1), second.get(&w2))
        else {
            continue;
        };

        let similarity1 = cosine_similarity(a1, a2);
        let similarity2 = cosine_similarity(b1, b2);
        if similarity1.is_nan() || similarity2.is_nan() {
            continue;
        }
        predictions1.push(similarity1);
        predictions2.push(similarity2);
    }

    spearman(&predictions1, &predictions2)
}

/// Pairwise [`embedding_correlation`] for every ordered pair of models.
pub fn correlation_matrix<R: ScoredPair>(
    rows: &[R],
    models: &[(String, EmbeddingTable)],
) -> CorrelationMatrix {
    let labels = models.iter().map(|(label, _)| label.clone()).collect();
    let values = models
        .iter()
        .map(|(label1, table1)| {
            models
                .iter()
                .map(|(label2, table2)| {
                    let result = embedding_correlation(rows, table1, table2);
                    debug!(first = %label1, second = %label2, rho = result.coefficient, n = result.n, "model correlation");
                    result.coefficient
                })
                .collect()
        })
        .collect();

    CorrelationMatrix::new(labels, values)
}
