use std::path::Path;

use tracing::info;

use super::evaluate::load_restriction;
use super::CommandError;
use crate::config::Config;
use crate::datasets::load_pair_dataset;
use crate::embeddings::{EmbeddingTable, ReaderOptions};
use crate::evaluation::correlation_matrix;

pub(super) fn run(
    dataset: &Path,
    output: &Path,
    embeddings: &[impl AsRef<Path>],
    wordset: Option<&Path>,
    config: &Config,
) -> Result<(), CommandError> {
    let pairs = load_pair_dataset(dataset)?;
    info!(file = %dataset.display(), rows = pairs.len(), "loaded dataset");

    let restriction = load_restriction(wordset)?;
    let options = ReaderOptions::lowercase().with_optional_restriction(restriction);

    let mut models = Vec::with_capacity(embeddings.len());
    for path in embeddings {
        let path = path.as_ref();
        let table = EmbeddingTable::load(path, options.clone(), config.diagnostics())?;
        models.push((path.to_string_lossy().into_owned(), table));
    }

    let matrix = correlation_matrix(&pairs, &models);
    matrix.write_csv(output)?;
    info!(file = %output.display(), models = matrix.len(), "correlation matrix written");

    Ok(())
}
