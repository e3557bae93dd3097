//! Word-embedding files: layout detection, streaming decode and the in-memory table.
//!
//! Two plain-text layouts are recognised, optionally gzip-compressed (`.gz`):
//!
//! - word2vec: a leading `vocab_size dim` line, then `word v1 ... vdim`
//! - GloVe: no header, the dimension is taken from the first data line

mod reader;
mod table;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

pub use reader::{EmbeddingIter, EmbeddingSource};
pub use table::{vocabulary_intersection, EmbeddingTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingFormat {
    /// `vocab_size dim` header on the first line.
    Word2Vec,
    /// No header; every line is a record.
    GloVe,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingRecord {
    pub word: String,
    pub vector: Vec<f32>,
}

/// What the reader reports while streaming a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    /// Emit a warning for every skipped malformed line.
    pub report_malformed: bool,
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            report_malformed: true,
            show_progress: false,
        }
    }
}

impl Diagnostics {
    pub fn quiet() -> Self {
        Self {
            report_malformed: false,
            show_progress: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// Lowercase words before filtering and storing them.
    pub lowercase: bool,
    /// Only keep words in this set. Checked after lowercasing.
    pub restrict: Option<Arc<HashSet<String>>>,
}

impl ReaderOptions {
    pub fn lowercase() -> Self {
        Self {
            lowercase: true,
            restrict: None,
        }
    }

    pub fn with_restriction(mut self, words: Arc<HashSet<String>>) -> Self {
        self.restrict = Some(words);
        self
    }

    pub fn with_optional_restriction(self, words: Option<Arc<HashSet<String>>>) -> Self {
        match words {
            Some(words) => self.with_restriction(words),
            None => self,
        }
    }
}

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid header in {}: {line:?}", path.display())]
    InvalidHeader { path: PathBuf, line: String },
    #[error("embedding file {} is empty", path.display())]
    Empty { path: PathBuf },
}
