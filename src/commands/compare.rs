use std::path::Path;

use tracing::debug;

use super::CommandError;
use crate::datasets::{load_gold_correlations, CorrelationMatrix, GoldCorrelations};
use crate::report::write_significance_results;
use crate::stats::{dependent_corr, DependentMethod, SignificanceVerdict, TestOptions};

pub(super) fn run(
    reference: &str,
    gold: &Path,
    matrix: &Path,
    n: usize,
    options: &TestOptions,
    method: DependentMethod,
) -> Result<(), CommandError> {
    let gold = load_gold_correlations(gold, reference)?;
    let matrix = CorrelationMatrix::read_csv(matrix)?;

    let results = compare_models(reference, &gold, &matrix, n, options, method)?;
    write_significance_results(std::io::stdout().lock(), reference, &results)?;
    Ok(())
}

/// Tests every non-reference model of `gold` against the reference.
///
/// `xy` is the reference's correlation with the gold dataset, `xz` the other
/// model's, and `yz` the correlation between both models read from `matrix`.
pub fn compare_models(
    reference: &str,
    gold: &GoldCorrelations,
    matrix: &CorrelationMatrix,
    n: usize,
    options: &TestOptions,
    method: DependentMethod,
) -> Result<Vec<(String, SignificanceVerdict)>, CommandError> {
    let mut results = Vec::with_capacity(gold.others.len());
    for (model, xz) in &gold.others {
        let xy = gold.reference;
        let yz = matrix.between(reference, model)?;
        debug!(reference, model = %model, xy, xz, yz, "comparing correlations");

        let verdict = dependent_corr(xy, *xz, yz, n, options, method)?;
        results.push((model.clone(), verdict));
    }
    Ok(results)
}
