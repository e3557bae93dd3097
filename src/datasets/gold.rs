use std::path::Path;

use super::{DatasetError, parse_score};

/// Correlations of several models with one gold dataset, split into the
/// reference model and the rest (in file order).
#[derive(Debug, Clone, PartialEq)]
pub struct GoldCorrelations {
    pub reference: f64,
    pub others: Vec<(String, f64)>,
}

/// Reads an evaluation table (model name, rho, ...) with a header row.
pub fn load_gold_correlations(
    path: impl AsRef<Path>,
    reference_model: &str,
) -> Result<GoldCorrelations, DatasetError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))?;

    let mut reference = None;
    let mut others = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| DatasetError::csv(path, e))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let (Some(name), Some(value)) = (row.get(0), row.get(1)) else {
            return Err(DatasetError::malformed(path, line, "expected a model name and a coefficient"));
        };
        let rho = parse_score(value)
            .ok_or_else(|| DatasetError::malformed(path, line, format!("invalid coefficient {value:?}")))?;

        if name == reference_model {
            reference = Some(rho);
        } else {
            others.push((name.to_string(), rho));
        }
    }

    let reference = reference.ok_or_else(|| DatasetError::MissingReference(reference_model.to_string()))?;
    Ok(GoldCorrelations { reference, others })
}
