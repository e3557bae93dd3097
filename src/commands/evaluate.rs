use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::CommandError;
use crate::config::Config;
use crate::datasets::{load_priming_dataset, load_wordset, model_name};
use crate::embeddings::{EmbeddingTable, ReaderOptions};
use crate::evaluation::evaluate;
use crate::report::{render_evaluation_table, write_evaluation_csv, EvaluationRow};

pub(super) fn run(
    dataset: &Path,
    embeddings: &[impl AsRef<Path>],
    wordset: Option<&Path>,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), CommandError> {
    let records = load_priming_dataset(dataset)?;
    info!(file = %dataset.display(), rows = records.len(), "loaded dataset");

    let restriction = load_restriction(wordset)?;
    let options = ReaderOptions::default().with_optional_restriction(restriction);

    let mut rows = Vec::with_capacity(embeddings.len());
    for path in embeddings {
        let path = path.as_ref();
        let table = EmbeddingTable::load(path, options.clone(), config.diagnostics())?;
        let evaluation = evaluate(&records, &table);
        rows.push(EvaluationRow::new(model_name(&path.to_string_lossy()), &evaluation));
    }

    println!("{}", render_evaluation_table(&rows));

    if let Some(output) = output {
        write_evaluation_csv(output, &rows)?;
        info!(file = %output.display(), "results written");
    }

    Ok(())
}

pub(super) fn load_restriction(wordset: Option<&Path>) -> Result<Option<Arc<HashSet<String>>>, CommandError> {
    let Some(path) = wordset else {
        return Ok(None);
    };
    let words = load_wordset(path)?;
    info!(file = %path.display(), words = words.len(), "loaded wordset");
    Ok(Some(Arc::new(words)))
}
