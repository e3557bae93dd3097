//! Dataset files consumed and produced around the evaluation core.
//!
//! Each on-disk shape has its own record type, validated when the file is read.

pub mod corr_matrix;
pub mod gold;
pub mod pairs;
pub mod priming;
pub mod wordset;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use corr_matrix::CorrelationMatrix;
pub use gold::{load_gold_correlations, GoldCorrelations};
pub use pairs::{load_pair_dataset, load_similarity_dataset, similarity_scores, PairRecord, SimilarityRecord};
pub use priming::{load_priming_dataset, priming_scores, PrimingRecord};
pub use wordset::{load_wordset, write_wordset};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{}:{line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        reason: String,
    },
    #[error("reference model '{0}' not found")]
    MissingReference(String),
    #[error("model '{0}' not found in correlation matrix")]
    UnknownModel(String),
}

impl DatasetError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: &Path, line: u64, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}

/// Basename without its last extension: `/data/glove.6B.txt` gives `glove.6B`.
pub fn model_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

/// Basename with its extension.
pub fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

pub(crate) fn parse_score(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok()
}
