use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::info;

use super::{Diagnostics, EmbeddingError, EmbeddingSource, ReaderOptions};

/// Word to vector mapping built from one embedding file. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl EmbeddingTable {
    pub fn load(
        path: impl AsRef<Path>,
        options: ReaderOptions,
        diagnostics: Diagnostics,
    ) -> Result<Self, EmbeddingError> {
        let source = EmbeddingSource::open(path, options, diagnostics)?;
        Self::from_source(&source)
    }

    /// Later duplicates of a word overwrite earlier ones.
    pub fn from_source(source: &EmbeddingSource) -> Result<Self, EmbeddingError> {
        info!(file = %source.path().display(), "loading word embeddings");

        let mut vectors = HashMap::with_capacity(source.vocab_hint().unwrap_or(0).min(1 << 20));
        for record in source.records()? {
            let record = record?;
            vectors.insert(record.word, record.vector);
        }

        info!(
            file = %source.path().display(),
            words = vectors.len(),
            dim = source.dim(),
            "loaded word embeddings"
        );

        Ok(Self {
            dim: source.dim(),
            vectors,
        })
    }

    /// Builds a table from in-memory pairs; vectors of the wrong length are dropped.
    pub fn from_pairs<I>(dim: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<f32>)>,
    {
        let vectors = pairs
            .into_iter()
            .filter(|(_, vector)| vector.len() == dim)
            .collect();
        Self { dim, vectors }
    }

    /// Only the vocabulary of a file, without keeping any vector.
    pub fn load_words(
        path: impl AsRef<Path>,
        options: ReaderOptions,
        diagnostics: Diagnostics,
    ) -> Result<HashSet<String>, EmbeddingError> {
        EmbeddingSource::open(path, options, diagnostics)?.words()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.vectors.keys().map(String::as_str)
    }
}

/// Words present in every one of the given embedding files.
///
/// Files are read one after the other; an empty path list yields an empty set.
pub fn vocabulary_intersection<P: AsRef<Path>>(
    paths: &[P],
    options: &ReaderOptions,
    diagnostics: Diagnostics,
) -> Result<HashSet<String>, EmbeddingError> {
    let mut intersection: Option<HashSet<String>> = None;

    for path in paths {
        let words = EmbeddingTable::load_words(path, options.clone(), diagnostics)?;
        info!(file = %path.as_ref().display(), words = words.len(), "read vocabulary");

        intersection = Some(match intersection {
            Some(current) => current.intersection(&words).cloned().collect(),
            None => words,
        });
    }

    Ok(intersection.unwrap_or_default())
}
