use std::path::Path;

use tracing::{debug, info};

use super::CommandError;
use crate::datasets::{load_priming_dataset, load_similarity_dataset, model_name, priming_scores, similarity_scores};
use crate::report::{write_dataset_correlations, DatasetCorrelationRow};
use crate::stats::spearman;

pub(super) fn run(priming: &Path, others: &[impl AsRef<Path>]) -> Result<(), CommandError> {
    let priming_scores = priming_scores(&load_priming_dataset(priming)?);
    info!(file = %priming.display(), pairs = priming_scores.len(), "loaded priming dataset");

    let mut rows = Vec::with_capacity(others.len());
    for path in others {
        let path = path.as_ref();
        let other_scores = similarity_scores(&load_similarity_dataset(path)?);

        let mut common: Vec<&(String, String)> = priming_scores
            .keys()
            .filter(|key| other_scores.contains_key(*key))
            .collect();
        common.sort();

        let mut x = Vec::with_capacity(common.len());
        let mut y = Vec::with_capacity(common.len());
        for key in &common {
            let (Some(a), Some(b)) = (priming_scores.get(*key), other_scores.get(*key)) else {
                continue;
            };
            debug!(prime = %key.0, target = %key.1, priming = a, other = b, "common pair");
            x.push(*a);
            y.push(*b);
        }

        let result = spearman(&x, &y);
        rows.push(DatasetCorrelationRow {
            dataset: model_name(&path.to_string_lossy()),
            rho: result.coefficient,
            n_common: common.len(),
        });
    }

    write_dataset_correlations(std::io::stdout().lock(), &rows)?;
    Ok(())
}
